//! Test-Hilfen: aufzeichnende bzw. gezielt versagende Engine.

use super::ToolContext;
use crate::core::{
    DensifyPolicy, EllipsoidalEngine, GeoBounds, GeodesicMeasure, GeodeticEngine, LinearUnit,
    Polyline,
};
use glam::DVec2;
use std::cell::{Cell, RefCell};

/// Aufgezeichneter `ellipse_outline`-Aufruf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OutlineCall {
    pub center: DVec2,
    pub unit: LinearUnit,
    pub major: f64,
    pub minor: f64,
    pub bearing_deg: f64,
}

/// WGS84-Engine, die Umriss-Anfragen aufzeichnet und auf Wunsch versagt.
#[derive(Default)]
pub(crate) struct RecordingEngine {
    inner: EllipsoidalEngine,
    pub outline_calls: RefCell<Vec<OutlineCall>>,
    pub fail_outline: Cell<bool>,
    pub fail_destination: Cell<bool>,
    pub fail_measure: Cell<bool>,
}

impl RecordingEngine {
    pub fn last_outline(&self) -> Option<OutlineCall> {
        self.outline_calls.borrow().last().copied()
    }
}

impl GeodeticEngine for RecordingEngine {
    fn destination_point(
        &self,
        origin: DVec2,
        distance: f64,
        unit: LinearUnit,
        bearing_deg: f64,
    ) -> Option<DVec2> {
        if self.fail_destination.get() {
            return None;
        }
        self.inner
            .destination_point(origin, distance, unit, bearing_deg)
    }

    fn ellipse_outline(
        &self,
        center: DVec2,
        unit: LinearUnit,
        major_axis: f64,
        minor_axis: f64,
        bearing_deg: f64,
        densify: DensifyPolicy,
    ) -> Option<Polyline> {
        self.outline_calls.borrow_mut().push(OutlineCall {
            center,
            unit,
            major: major_axis,
            minor: minor_axis,
            bearing_deg,
        });
        if self.fail_outline.get() {
            return None;
        }
        self.inner
            .ellipse_outline(center, unit, major_axis, minor_axis, bearing_deg, densify)
    }

    fn geodesic_line(
        &self,
        from: DVec2,
        to: DVec2,
        unit: LinearUnit,
        densify: DensifyPolicy,
    ) -> Option<Polyline> {
        if self.fail_destination.get() {
            return None;
        }
        self.inner.geodesic_line(from, to, unit, densify)
    }

    fn measure(&self, from: DVec2, to: DVec2, unit: LinearUnit) -> Option<GeodesicMeasure> {
        if self.fail_measure.get() {
            return None;
        }
        self.inner.measure(from, to, unit)
    }
}

/// Weltweiter Arbeitsbereich.
pub(crate) const WORLD: GeoBounds = GeoBounds::WORLD;

/// Kontext mit Engine und weltweitem Arbeitsbereich.
pub(crate) fn ctx(engine: &RecordingEngine) -> ToolContext<'_> {
    ToolContext {
        engine,
        area: &WORLD,
    }
}

/// Punkt in `meters` Entfernung unter `bearing_deg` von `origin`.
pub(crate) fn offset(origin: DVec2, meters: f64, bearing_deg: f64) -> DVec2 {
    EllipsoidalEngine::wgs84()
        .destination_point(origin, meters, LinearUnit::Meters, bearing_deg)
        .expect("Zielpunkt erwartet")
}
