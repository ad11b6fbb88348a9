//! Ring- und Radialen-Geometrie.

use super::super::{AttributeValue, ShapeKind, ToolResult};
use crate::core::{convert_distance, DensifyPolicy, GeodeticEngine, LinearUnit, Polyline};
use glam::DVec2;
use std::collections::BTreeMap;

/// Parameter einer Ring-Konstruktion in der Einheit des Abstands.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RingLayout {
    pub center: DVec2,
    pub ring_count: u32,
    pub interval: f64,
    pub unit: LinearUnit,
    pub radial_count: u32,
}

impl RingLayout {
    /// Radius des äußersten Rings.
    pub fn outer_radius(&self) -> f64 {
        self.interval * self.ring_count as f64
    }

    /// Peilungen der Radialen, gleichmäßig ab Nord verteilt.
    pub fn radial_bearings(&self) -> impl Iterator<Item = f64> + '_ {
        let step = 360.0 / self.radial_count.max(1) as f64;
        (0..self.radial_count).map(move |i| i as f64 * step)
    }
}

/// Erzeugt alle Ringe (innen nach außen) und danach alle Radialen.
///
/// `None`, sobald die Engine eine Teilgeometrie nicht liefern kann.
pub(crate) fn build_rings(
    engine: &dyn GeodeticEngine,
    layout: &RingLayout,
    ring_densify: DensifyPolicy,
    radial_densify: DensifyPolicy,
) -> Option<Vec<Polyline>> {
    let mut geometries = Vec::with_capacity((layout.ring_count + layout.radial_count) as usize);
    for i in 1..=layout.ring_count {
        let radius = layout.interval * i as f64;
        geometries.push(engine.ellipse_outline(
            layout.center,
            layout.unit,
            radius,
            radius,
            0.0,
            ring_densify,
        )?);
    }
    let outer = layout.outer_radius();
    for bearing in layout.radial_bearings() {
        let end = engine.destination_point(layout.center, outer, layout.unit, bearing)?;
        geometries.push(engine.geodesic_line(layout.center, end, layout.unit, radial_densify)?);
    }
    Some(geometries)
}

pub(crate) fn build_result(
    geometries: Vec<Polyline>,
    layout: &RingLayout,
    display_unit: LinearUnit,
) -> ToolResult {
    let interval = convert_distance(layout.interval, layout.unit, display_unit);
    let mut attributes = BTreeMap::new();
    attributes.insert("ringCount", AttributeValue::Number(layout.ring_count as f64));
    attributes.insert("ringInterval", AttributeValue::Number(interval));
    attributes.insert(
        "outerRadius",
        AttributeValue::Number(interval * layout.ring_count as f64),
    );
    attributes.insert("radialCount", AttributeValue::Number(layout.radial_count as f64));
    attributes.insert("centerX", AttributeValue::Number(layout.center.x));
    attributes.insert("centerY", AttributeValue::Number(layout.center.y));
    attributes.insert(
        "distanceUnitLabel",
        AttributeValue::Text(display_unit.label().to_string()),
    );

    ToolResult {
        kind: ShapeKind::RangeRings,
        geometries,
        attributes,
        label: None,
    }
}
