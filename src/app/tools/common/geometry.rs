//! Punkt-Ableitung aus Anker, Distanz und Peilung.

use super::Distance;
use crate::core::GeodeticEngine;
use crate::shared::ShapeError;
use glam::DVec2;

/// Leitet einen Punkt (Ende einer Achse / Linie) aus Anker, Distanz und Azimut ab.
///
/// `Ok(None)` wenn Anker fehlt oder die Distanz 0 ist.
pub fn derive_axis_point(
    engine: &dyn GeodeticEngine,
    anchor: Option<DVec2>,
    axis: Distance,
    azimuth_deg: f64,
) -> Result<Option<DVec2>, ShapeError> {
    let Some(anchor) = anchor else {
        return Ok(None);
    };
    if !axis.is_set() {
        return Ok(None);
    }
    engine
        .destination_point(anchor, axis.value, axis.unit, azimuth_deg)
        .map(Some)
        .ok_or(ShapeError::GeometryConstruction("Endpunkt der Achse"))
}
