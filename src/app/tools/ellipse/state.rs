//! Konstruktions-Zustand des Ellipsen-Tools: Punkte, Achsen, Azimut, Felder.
//!
//! Jeder Setter prüft, speichert und leitet Punkt 2 sowie die Vorschau
//! synchron neu ab, bevor er zurückkehrt.

use super::super::common::{
    derive_axis_point, trim_precision, validate_azimuth, Angle, Distance, DistanceSlot,
    FieldMirror, ToolSettings,
};
use super::super::ToolPreview;
use super::geometry::{ellipse_outline, preview_minor};
use crate::core::GeodeticEngine;
use crate::shared::{EllipseMode, ShapeError};
use glam::DVec2;

pub(crate) const MAJOR_AXIS: &str = "majorAxis";
pub(crate) const MINOR_AXIS: &str = "minorAxis";

/// Phasen der Ellipsen-Konstruktion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Noch kein Mittelpunkt
    Empty,
    /// Mittelpunkt gesetzt, Hauptachse folgt der Maus
    AnchorSet,
    /// Hauptachse fixiert, Nebenachse folgt der Maus
    MajorAxisPreview,
    /// Alle Eingaben vorhanden, Abschluss möglich
    ReadyToFinalize,
}

/// Ellipsen-Tool
pub struct EllipseTool {
    pub(crate) phase: Phase,
    /// Mittelpunkt
    pub(crate) anchor: Option<DVec2>,
    /// Ende der Hauptachse (immer abgeleitet)
    pub(crate) point2: Option<DVec2>,
    /// Dritter Punkt (legt die Nebenachse fest)
    pub(crate) point3: Option<DVec2>,
    /// Haupt-Halbachse
    pub(crate) major: DistanceSlot,
    /// Neben-Halbachse
    pub(crate) minor: DistanceSlot,
    pub(crate) azimuth: Option<Angle>,
    pub(crate) major_field: FieldMirror,
    pub(crate) minor_field: FieldMirror,
    pub(crate) azimuth_field: FieldMirror,
    pub(crate) settings: ToolSettings,
    pub(crate) preview: ToolPreview,
}

impl EllipseTool {
    /// Erstellt ein neues Ellipsen-Tool mit Standard-Einstellungen.
    pub fn new() -> Self {
        Self::with_settings(ToolSettings::default())
    }

    /// Erstellt ein Ellipsen-Tool mit vorgegebenen Einstellungen.
    pub fn with_settings(settings: ToolSettings) -> Self {
        Self {
            phase: Phase::Empty,
            anchor: None,
            point2: None,
            point3: None,
            major: DistanceSlot::default(),
            minor: DistanceSlot::default(),
            azimuth: None,
            major_field: FieldMirror::default(),
            minor_field: FieldMirror::default(),
            azimuth_field: FieldMirror::default(),
            settings,
            preview: ToolPreview::default(),
        }
    }

    // ── Lesezugriff ─────────────────────────────────────────────

    /// Aktuelle Phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ende der Hauptachse
    pub fn point2(&self) -> Option<DVec2> {
        self.point2
    }

    /// Dritter Punkt
    pub fn point3(&self) -> Option<DVec2> {
        self.point3
    }

    /// Letzte gültige Haupt-Halbachse
    pub fn major_axis(&self) -> Distance {
        self.major.valid
    }

    /// Letzte gültige Neben-Halbachse
    pub fn minor_axis(&self) -> Distance {
        self.minor.valid
    }

    /// Zurückgehaltener Rohwert der Hauptachse (Limit überschritten)
    pub fn pending_major_axis(&self) -> Option<Distance> {
        self.major.pending
    }

    /// Zurückgehaltener Rohwert der Nebenachse
    pub fn pending_minor_axis(&self) -> Option<Distance> {
        self.minor.pending
    }

    /// Gespeicherter Azimut
    pub fn azimuth(&self) -> Option<Angle> {
        self.azimuth
    }

    pub(crate) fn azimuth_deg(&self) -> f64 {
        self.azimuth.map_or(0.0, |a| a.degrees())
    }

    /// Anzeige-Wert einer Halbachse (Einheit + Modus).
    pub(crate) fn display_axis(&self, axis: Distance) -> f64 {
        axis.in_unit(self.settings.linear_unit) * self.settings.ellipse_mode.display_factor()
    }

    /// Halbachse aus einem Anzeige-Wert.
    pub(crate) fn axis_from_display(&self, value: f64) -> Distance {
        Distance::new(
            value / self.settings.ellipse_mode.display_factor(),
            self.settings.linear_unit,
        )
    }

    // ── Setter ──────────────────────────────────────────────────

    /// Setzt den Mittelpunkt und leitet Punkt 2 und Vorschau neu ab.
    ///
    /// Gelingt immer; scheitert nur die Ableitung, bleibt die Vorschau leer.
    pub fn set_anchor(&mut self, point: DVec2, engine: &dyn GeodeticEngine) {
        self.anchor = Some(point);
        if let Err(e) = self.rederive(engine) {
            log::warn!("Ellipse: Ableitung nach Mittelpunkt fehlgeschlagen: {}", e);
        }
    }

    /// Setzt die Haupt-Halbachse.
    pub fn set_major_axis(
        &mut self,
        axis: Distance,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        let result = self.apply_major(axis, engine);
        self.refresh_axis_fields();
        result
    }

    /// Setzt die Neben-Halbachse.
    pub fn set_minor_axis(
        &mut self,
        axis: Distance,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        let result = self.apply_minor(axis, engine);
        self.refresh_axis_fields();
        result
    }

    /// Setzt den Azimut der Hauptachse.
    pub fn set_azimuth(
        &mut self,
        azimuth: Angle,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        let result = self.apply_azimuth(azimuth, engine);
        self.refresh_azimuth_field();
        result
    }

    /// Wechselt zwischen Halb- und Vollachsen-Anzeige. Gespeicherte Werte bleiben.
    pub fn set_ellipse_mode(&mut self, mode: EllipseMode) {
        self.settings.ellipse_mode = mode;
        self.refresh_axis_fields();
    }

    /// Prüft beide Achsen gegen das aktuelle Limit (z.B. nach Limit-Änderung).
    ///
    /// Rohwerte werden erneut angewendet. Gültige Achsen, die das Limit jetzt
    /// überschreiten, werden zu Rohwerten; die Konstruktion fällt dann in die
    /// Phase zurück, in der die Achse neu festgelegt wird.
    pub fn revalidate(&mut self, engine: &dyn GeodeticEngine) -> Result<(), ShapeError> {
        let limit = self.settings.limit_m;
        let major = match self.major.pending {
            Some(raw) => self.apply_major(raw, engine),
            None => self.major.recheck(MAJOR_AXIS, limit).map_err(|e| self.reject(e)),
        };
        let minor = match self.minor.pending {
            Some(raw) => self.apply_minor(raw, engine),
            None => self.minor.recheck(MINOR_AXIS, limit).map_err(|e| self.reject(e)),
        };
        self.fall_back_to_open_axis();
        self.refresh_axis_fields();
        major.and(minor)
    }

    /// Setzt die Phase auf die erste Achse zurück, die noch einen Rohwert hält.
    fn fall_back_to_open_axis(&mut self) {
        let phase = if self.major.pending.is_some() {
            Phase::AnchorSet
        } else if self.minor.pending.is_some() {
            Phase::MajorAxisPreview
        } else {
            return;
        };
        if matches!(self.phase, Phase::MajorAxisPreview | Phase::ReadyToFinalize)
            && self.phase != phase
        {
            log::debug!("Ellipse: Achse über Limit → {:?}", phase);
            self.phase = phase;
            self.point3 = None;
        }
    }

    // ── interne Anwendung (ohne Feld-Auffrischung) ──────────────

    pub(crate) fn apply_major(
        &mut self,
        axis: Distance,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        let checked = match self.major.check(MAJOR_AXIS, axis, self.settings.limit_m) {
            Ok(checked) => checked,
            Err(e) => return Err(self.reject(e)),
        };

        let minor = self.minor.valid;
        if self.minor.pending.is_none() && minor.is_set() && checked.meters() < minor.meters() {
            let unit = self.settings.linear_unit;
            return Err(self.reject(ShapeError::AxisOrder {
                major: checked.in_unit(unit),
                minor: minor.in_unit(unit),
            }));
        }

        self.major.commit(checked);
        self.rederive(engine)
    }

    pub(crate) fn apply_minor(
        &mut self,
        axis: Distance,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        let checked = match self.minor.check(MINOR_AXIS, axis, self.settings.limit_m) {
            Ok(checked) => checked,
            Err(e) => return Err(self.reject(e)),
        };

        if self.major.pending.is_some() {
            // Hauptachse ungültig: Wert merken, keine Vorschau
            self.minor.commit(checked);
            self.preview.clear();
            return Ok(());
        }

        let major = self.major.valid;
        if major.is_set() && checked.meters() > major.meters() {
            let unit = self.settings.linear_unit;
            return Err(self.reject(ShapeError::AxisOrder {
                major: major.in_unit(unit),
                minor: checked.in_unit(unit),
            }));
        }

        self.minor.commit(checked);
        if major.is_set() {
            self.refresh_preview(engine)
        } else {
            Ok(())
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

    /// Protokolliert eine abgelehnte Eingabe; Limit-Verletzungen leeren die Vorschau.
    fn reject(&mut self, e: ShapeError) -> ShapeError {
        if matches!(e, ShapeError::LimitExceeded { .. }) {
            self.preview.clear();
        }
        log::warn!("Ellipse: Eingabe abgelehnt: {}", e);
        e
    }

    // ── Ableitungen ─────────────────────────────────────────────

    /// Leitet Punkt 2 und die Vorschau neu ab.
    pub(crate) fn rederive(&mut self, engine: &dyn GeodeticEngine) -> Result<(), ShapeError> {
        match derive_axis_point(engine, self.anchor, self.major.valid, self.azimuth_deg()) {
            Ok(point2) => self.point2 = point2,
            Err(e) => {
                self.point2 = None;
                self.preview.clear();
                return Err(e);
            }
        }
        self.refresh_preview(engine)
    }

    /// Baut die Vorschau aus dem gespeicherten Zustand neu auf.
    pub(crate) fn refresh_preview(
        &mut self,
        engine: &dyn GeodeticEngine,
    ) -> Result<(), ShapeError> {
        self.preview.clear();
        let Some(anchor) = self.anchor else {
            return Ok(());
        };
        if self.major.pending.is_some() || self.minor.pending.is_some() {
            return Ok(());
        }
        self.preview.markers.push(anchor);
        self.preview.markers.extend(self.point2);
        self.preview.markers.extend(self.point3);

        let major = self.major.valid;
        if !major.is_set() {
            return Ok(());
        }
        let minor = Distance::new(
            preview_minor(major.value, self.minor.valid.in_unit(major.unit)),
            major.unit,
        );
        match ellipse_outline(
            engine,
            anchor,
            major,
            minor,
            self.azimuth_deg(),
            self.settings.preview_densify,
        ) {
            Some(outline) => {
                self.preview.outlines.push(outline);
                Ok(())
            }
            None => {
                self.preview.clear();
                Err(ShapeError::GeometryConstruction("Ellipsen-Vorschau"))
            }
        }
    }

    // ── Felder ──────────────────────────────────────────────────

    /// Erzeugt die Texte beider Achsen-Felder neu.
    pub(crate) fn refresh_axis_fields(&mut self) {
        let major = self.display_axis(self.major.shown());
        let minor = self.display_axis(self.minor.shown());
        refresh_field(&mut self.major_field, &self.major, major);
        refresh_field(&mut self.minor_field, &self.minor, minor);
    }

    /// Erzeugt den Text des Azimut-Felds neu.
    pub(crate) fn refresh_azimuth_field(&mut self) {
        match self.azimuth {
            Some(az) => self
                .azimuth_field
                .show(az.in_unit(self.settings.azimuth_unit)),
            None => self.azimuth_field.clear(),
        }
    }

    /// Setzt Punkte, Werte, Felder und Vorschau zurück. Einstellungen bleiben.
    pub(crate) fn clear_construction(&mut self) {
        self.phase = Phase::Empty;
        self.anchor = None;
        self.point2 = None;
        self.point3 = None;
        self.major = DistanceSlot::default();
        self.minor = DistanceSlot::default();
        self.azimuth = None;
        self.major_field.clear();
        self.minor_field.clear();
        self.azimuth_field.clear();
        self.preview.clear();
    }
}

impl Default for EllipseTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Zeigt einen Slot-Wert an, sofern er je gesetzt wurde.
fn refresh_field(field: &mut FieldMirror, slot: &DistanceSlot, display: f64) {
    if slot.pending.is_some() || slot.valid.is_set() || !field.text().is_empty() {
        field.show(display);
    }
}
