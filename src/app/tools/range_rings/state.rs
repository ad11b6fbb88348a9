//! Konstruktions-Zustand der Entfernungsringe.

use super::super::common::{
    trim_precision, validate_distance, Distance, DistanceSlot, FieldMirror, ToolSettings,
};
use super::super::ToolPreview;
use super::geometry::{build_rings, RingLayout};
use crate::core::GeodeticEngine;
use crate::shared::ShapeError;
use glam::DVec2;

pub(crate) const RING_COUNT: &str = "ringCount";
pub(crate) const RING_INTERVAL: &str = "ringInterval";
pub(crate) const RADIAL_COUNT: &str = "radialCount";

pub(crate) const DEFAULT_RING_COUNT: u32 = 3;
pub(crate) const MAX_RING_COUNT: u32 = 100;
pub(crate) const MAX_RADIAL_COUNT: u32 = 360;

/// Phasen der Ring-Konstruktion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Noch kein Mittelpunkt
    Empty,
    /// Mittelpunkt gesetzt, Ring-Abstand folgt der Maus
    CenterSet,
    /// Abstand festgelegt, Abschluss möglich
    ReadyToFinalize,
}

/// Prüft eine ganzzahlige Anzahl im Bereich `min..=max`.
pub(crate) fn validate_count(
    field: &'static str,
    value: f64,
    min: u32,
    max: u32,
) -> Result<u32, ShapeError> {
    if !value.is_finite() || value.fract() != 0.0 || value < min as f64 || value > max as f64 {
        return Err(ShapeError::OutOfRange { field, value });
    }
    Ok(value as u32)
}

/// Entfernungsringe-Tool
pub struct RangeRingsTool {
    pub(crate) phase: Phase,
    pub(crate) center: Option<DVec2>,
    pub(crate) ring_count: u32,
    /// Abstand zwischen zwei Ringen
    pub(crate) interval: DistanceSlot,
    pub(crate) radial_count: u32,
    pub(crate) ring_count_field: FieldMirror,
    pub(crate) interval_field: FieldMirror,
    pub(crate) radial_count_field: FieldMirror,
    pub(crate) settings: ToolSettings,
    pub(crate) preview: ToolPreview,
}

impl RangeRingsTool {
    pub fn new() -> Self {
        Self::with_settings(ToolSettings::default())
    }

    pub fn with_settings(settings: ToolSettings) -> Self {
        let mut tool = Self {
            phase: Phase::Empty,
            center: None,
            ring_count: DEFAULT_RING_COUNT,
            interval: DistanceSlot::default(),
            radial_count: 0,
            ring_count_field: FieldMirror::default(),
            interval_field: FieldMirror::default(),
            radial_count_field: FieldMirror::default(),
            settings,
            preview: ToolPreview::default(),
        };
        tool.refresh_count_fields();
        tool
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ring_count(&self) -> u32 {
        self.ring_count
    }

    pub fn radial_count(&self) -> u32 {
        self.radial_count
    }

    /// Letzter gültiger Ring-Abstand
    pub fn interval(&self) -> Distance {
        self.interval.valid
    }

    /// Zurückgehaltener Rohwert des Abstands (Limit überschritten)
    pub fn pending_interval(&self) -> Option<Distance> {
        self.interval.pending
    }

    pub(crate) fn layout(&self, center: DVec2) -> RingLayout {
        RingLayout {
            center,
            ring_count: self.ring_count,
            interval: self.interval.valid.value,
            unit: self.interval.valid.unit,
            radial_count: self.radial_count,
        }
    }

    // ── Setter ──────────────────────────────────────────────────

    pub fn set_center(&mut self, point: DVec2, engine: &dyn GeodeticEngine) {
        self.center = Some(point);
        if let Err(e) = self.refresh_preview(engine) {
            log::warn!("Entfernungsringe: Vorschau nach Mittelpunkt fehlgeschlagen: {}", e);
        }
    }

    /// Setzt die Anzahl der Ringe; der äußerste Ring muss im Limit bleiben.
    pub fn set_ring_count(
        &mut self,
        count: u32,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        let result = self.apply_ring_count(count, engine);
        self.refresh_count_fields();
        result
    }

    /// Setzt den Ring-Abstand.
    pub fn set_interval(
        &mut self,
        interval: Distance,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        let result = self.apply_interval(interval, engine);
        self.refresh_interval_field();
        result
    }

    /// Setzt die Anzahl der Radialen.
    pub fn set_radial_count(
        &mut self,
        count: u32,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        let result = self.apply_radial_count(count, engine);
        self.refresh_count_fields();
        result
    }

    /// Prüft den Ring-Abstand gegen das aktuelle Limit; ein gültiger Abstand,
    /// dessen äußerer Ring es jetzt überschreitet, wird zum Rohwert.
    pub fn revalidate(&mut self, engine: &dyn GeodeticEngine) -> Result<(), ShapeError> {
        let valid = self.interval.valid;
        let result = match self.interval.pending {
            Some(raw) => self.apply_interval(raw, engine),
            None if valid.is_set() => self.apply_interval(valid, engine),
            None => Ok(()),
        };
        if self.interval.pending.is_some() && self.phase == Phase::ReadyToFinalize {
            log::debug!("Entfernungsringe: Abstand über Limit → CenterSet");
            self.phase = Phase::CenterSet;
        }
        self.refresh_interval_field();
        result
    }

    pub(crate) fn apply_ring_count(
        &mut self,
        count: u32,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        if let Err(e) = validate_count(RING_COUNT, count as f64, 1, MAX_RING_COUNT) {
            return Err(self.reject(e));
        }
        if self.interval.pending.is_none() {
            let valid = self.interval.valid;
            let outer = Distance::new(valid.value * count as f64, valid.unit);
            if let Err(e) = validate_distance(RING_COUNT, outer, self.settings.limit_m) {
                return Err(self.reject(e));
            }
        }
        self.ring_count = count;
        self.refresh_preview(engine)
    }

    pub(crate) fn apply_interval(
        &mut self,
        interval: Distance,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        let outer = Distance::new(interval.value * self.ring_count as f64, interval.unit);
        match validate_distance(RING_INTERVAL, outer, self.settings.limit_m) {
            Ok(()) => {}
            Err(ShapeError::OutOfRange { field, .. }) => {
                return Err(self.reject(ShapeError::OutOfRange {
                    field,
                    value: interval.value,
                }));
            }
            Err(e) => {
                self.interval.pending = Some(interval);
                return Err(self.reject(e));
            }
        }
        self.interval
            .commit(Distance::new(trim_precision(interval.value), interval.unit));
        self.refresh_preview(engine)
    }

    pub(crate) fn apply_radial_count(
        &mut self,
        count: u32,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        if let Err(e) = validate_count(RADIAL_COUNT, count as f64, 0, MAX_RADIAL_COUNT) {
            return Err(self.reject(e));
        }
        self.radial_count = count;
        self.refresh_preview(engine)
    }

    fn reject(&mut self, e: ShapeError) -> ShapeError {
        if matches!(e, ShapeError::LimitExceeded { .. }) {
            self.preview.clear();
        }
        log::warn!("Entfernungsringe: Eingabe abgelehnt: {}", e);
        e
    }

    // ── Vorschau ────────────────────────────────────────────────

    pub(crate) fn refresh_preview(
        &mut self,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        self.preview.clear();
        let Some(center) = self.center else {
            return Ok(());
        };
        if self.interval.pending.is_some() {
            return Ok(());
        }
        self.preview.markers.push(center);
        if !self.interval.is_usable() {
            return Ok(());
        }
        match build_rings(
            engine,
            &self.layout(center),
            self.settings.preview_densify,
            self.settings.line_densify,
        ) {
            Some(geometries) => {
                self.preview.outlines = geometries;
                Ok(())
            }
            None => {
                self.preview.clear();
                Err(ShapeError::GeometryConstruction("Ring-Vorschau"))
            }
        }
    }

    // ── Felder ──────────────────────────────────────────────────

    pub(crate) fn refresh_count_fields(&mut self) {
        self.ring_count_field.show(self.ring_count as f64);
        self.radial_count_field.show(self.radial_count as f64);
    }

    pub(crate) fn refresh_interval_field(&mut self) {
        let slot = self.interval;
        if slot.pending.is_some() || slot.valid.is_set() || !self.interval_field.text().is_empty()
        {
            self.interval_field
                .show(slot.shown().in_unit(self.settings.linear_unit));
        }
    }

    pub(crate) fn clear_construction(&mut self) {
        self.phase = Phase::Empty;
        self.center = None;
        self.ring_count = DEFAULT_RING_COUNT;
        self.interval = DistanceSlot::default();
        self.radial_count = 0;
        self.interval_field.clear();
        self.refresh_count_fields();
        self.preview.clear();
    }
}

impl Default for RangeRingsTool {
    fn default() -> Self {
        Self::new()
    }
}
