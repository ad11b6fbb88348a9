//! Konstruktions-Zustand des Linien-Tools.

use super::super::common::{
    derive_axis_point, trim_precision, validate_azimuth, Angle, Distance, DistanceSlot,
    FieldMirror, ToolSettings,
};
use super::super::ToolPreview;
use crate::core::GeodeticEngine;
use crate::shared::ShapeError;
use glam::DVec2;

pub(crate) const DISTANCE: &str = "distance";

/// Phasen der Linien-Konstruktion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Noch kein Startpunkt
    Empty,
    /// Startpunkt gesetzt, Endpunkt folgt der Maus
    StartSet,
    /// Endpunkt festgelegt, Abschluss möglich
    ReadyToFinalize,
}

/// Linien-Tool
pub struct LineTool {
    pub(crate) phase: Phase,
    pub(crate) start: Option<DVec2>,
    /// Endpunkt (geklickt oder aus Distanz + Azimut abgeleitet)
    pub(crate) end: Option<DVec2>,
    pub(crate) distance: DistanceSlot,
    pub(crate) azimuth: Option<Angle>,
    pub(crate) distance_field: FieldMirror,
    pub(crate) azimuth_field: FieldMirror,
    pub(crate) settings: ToolSettings,
    pub(crate) preview: ToolPreview,
}

impl LineTool {
    /// Erstellt ein neues Linien-Tool mit Standard-Einstellungen.
    pub fn new() -> Self {
        Self::with_settings(ToolSettings::default())
    }

    /// Erstellt ein Linien-Tool mit vorgegebenen Einstellungen.
    pub fn with_settings(settings: ToolSettings) -> Self {
        Self {
            phase: Phase::Empty,
            start: None,
            end: None,
            distance: DistanceSlot::default(),
            azimuth: None,
            distance_field: FieldMirror::default(),
            azimuth_field: FieldMirror::default(),
            settings,
            preview: ToolPreview::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn end(&self) -> Option<DVec2> {
        self.end
    }

    /// Letzte gültige Distanz
    pub fn distance(&self) -> Distance {
        self.distance.valid
    }

    /// Zurückgehaltener Rohwert der Distanz (Limit überschritten)
    pub fn pending_distance(&self) -> Option<Distance> {
        self.distance.pending
    }

    pub fn azimuth(&self) -> Option<Angle> {
        self.azimuth
    }

    pub(crate) fn azimuth_deg(&self) -> f64 {
        self.azimuth.map_or(0.0, |a| a.degrees())
    }

    // ── Setter ──────────────────────────────────────────────────

    /// Setzt den Startpunkt; ein vorhandener Endpunkt wird neu abgeleitet.
    pub fn set_start(&mut self, point: DVec2, engine: &dyn GeodeticEngine) {
        self.start = Some(point);
        if let Err(e) = self.rederive(engine) {
            log::warn!("Linie: Ableitung nach Startpunkt fehlgeschlagen: {}", e);
        }
    }

    /// Setzt die Distanz und leitet den Endpunkt neu ab.
    pub fn set_distance(
        &mut self,
        distance: Distance,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        let result = self.apply_distance(distance, engine);
        self.refresh_distance_field();
        result
    }

    /// Setzt den Azimut und leitet den Endpunkt neu ab.
    pub fn set_azimuth(
        &mut self,
        azimuth: Angle,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        let result = self.apply_azimuth(azimuth, engine);
        self.refresh_azimuth_field();
        result
    }

    /// Prüft die Distanz gegen das aktuelle Limit.
    ///
    /// Ein Rohwert wird erneut angewendet; eine gültige Distanz über dem
    /// Limit wird zum Rohwert und die Linie ist nicht mehr abschließbar.
    pub fn revalidate(&mut self, engine: &dyn GeodeticEngine) -> Result<(), ShapeError> {
        let result = match self.distance.pending {
            Some(raw) => self.apply_distance(raw, engine),
            None => self
                .distance
                .recheck(DISTANCE, self.settings.limit_m)
                .map_err(|e| self.reject(e)),
        };
        if self.distance.pending.is_some() && self.phase == Phase::ReadyToFinalize {
            log::debug!("Linie: Distanz über Limit → StartSet");
            self.phase = Phase::StartSet;
        }
        self.refresh_distance_field();
        result
    }

    pub(crate) fn apply_distance(
        &mut self,
        distance: Distance,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        match self.distance.check(DISTANCE, distance, self.settings.limit_m) {
            Ok(checked) => {
                self.distance.commit(checked);
                self.rederive(engine)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    pub(crate) fn apply_azimuth(
        &mut self,
        azimuth: Angle,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        if let Err(e) = validate_azimuth(azimuth) {
            return Err(self.reject(e));
        }
        self.azimuth = Some(Angle::new(trim_precision(azimuth.value), azimuth.unit));
        self.rederive(engine)
    }

    fn reject(&mut self, e: ShapeError) -> ShapeError {
        if matches!(e, ShapeError::LimitExceeded { .. }) {
            self.preview.clear();
        }
        log::warn!("Linie: Eingabe abgelehnt: {}", e);
        e
    }

    // ── Ableitungen ─────────────────────────────────────────────

    /// Leitet den Endpunkt aus Start, Distanz und Azimut neu ab.
    pub(crate) fn rederive(&mut self, engine: &dyn GeodeticEngine) -> Result<(), ShapeError> {
        match derive_axis_point(engine, self.start, self.distance.valid, self.azimuth_deg()) {
            Ok(end) => self.end = end,
            Err(e) => {
                self.end = None;
                self.preview.clear();
                return Err(e);
            }
        }
        self.refresh_preview(engine)
    }

    pub(crate) fn refresh_preview(
        &mut self,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        self.preview.clear();
        let Some(start) = self.start else {
            return Ok(());
        };
        if self.distance.pending.is_some() {
            return Ok(());
        }
        self.preview.markers.push(start);
        let Some(end) = self.end else {
            return Ok(());
        };
        self.preview.markers.push(end);
        match engine.geodesic_line(
            start,
            end,
            self.distance.valid.unit,
            self.settings.line_densify,
        ) {
            Some(line) => {
                self.preview.outlines.push(line);
                Ok(())
            }
            None => {
                self.preview.clear();
                Err(ShapeError::GeometryConstruction("Linien-Vorschau"))
            }
        }
    }

    // ── Felder ──────────────────────────────────────────────────

    pub(crate) fn refresh_distance_field(&mut self) {
        let slot = self.distance;
        if slot.pending.is_some() || slot.valid.is_set() || !self.distance_field.text().is_empty()
        {
            self.distance_field
                .show(slot.shown().in_unit(self.settings.linear_unit));
        }
    }

    pub(crate) fn refresh_azimuth_field(&mut self) {
        match self.azimuth {
            Some(az) => self
                .azimuth_field
                .show(az.in_unit(self.settings.azimuth_unit)),
            None => self.azimuth_field.clear(),
        }
    }

    pub(crate) fn clear_construction(&mut self) {
        self.phase = Phase::Empty;
        self.start = None;
        self.end = None;
        self.distance = DistanceSlot::default();
        self.azimuth = None;
        self.distance_field.clear();
        self.azimuth_field.clear();
        self.preview.clear();
    }
}

impl Default for LineTool {
    fn default() -> Self {
        Self::new()
    }
}
