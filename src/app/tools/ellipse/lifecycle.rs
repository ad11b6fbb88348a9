//! Lifecycle-Methoden des EllipseTool (on_click, on_mouse_move, execute, reset, …).
//!
//! Zustandsfolge: `Empty → AnchorSet → MajorAxisPreview → ReadyToFinalize`.
//! Der Abschluss (Ergebnis + Reset) erfolgt im Handler, sobald `on_click`
//! oder `on_enter` `ReadyToExecute` liefert.

use super::super::common::{
    derive_axis_point, round_to, validate_azimuth, validate_distance, Angle, Distance,
    FieldMirror,
};
use super::super::{
    check_area, ShapeField, ShapeKind, ShapeTool, ToolAction, ToolContext, ToolResult,
};
use super::geometry::{build_result, ellipse_outline, EllipseSummary};
use super::state::{EllipseTool, Phase, MAJOR_AXIS};
use crate::core::{convert_azimuth, AzimuthUnit, GeodeticEngine, LinearUnit};
use crate::shared::{EllipseMode, ShapeError, ToolOptions};
use glam::DVec2;

const FIELDS: &[ShapeField] = &[
    ShapeField::MajorAxis,
    ShapeField::MinorAxis,
    ShapeField::Azimuth,
];

impl EllipseTool {
    /// Misst Distanz (in Anzeige-Einheit, auf gespeicherte Präzision) und
    /// Azimut (gerundet, in Anzeige-Einheit) vom Mittelpunkt zu `pos`.
    fn measure_from_anchor(
        &self,
        anchor: DVec2,
        pos: DVec2,
        engine: &dyn GeodeticEngine,
    ) -> Option<(Distance, Angle)> {
        let unit = self.settings.linear_unit;
        let az_unit = self.settings.azimuth_unit;
        let m = engine.measure(anchor, pos, unit)?;
        let azimuth = convert_azimuth(m.initial_bearing_deg, AzimuthUnit::Degrees, az_unit);
        Some((
            Distance::new(m.length, unit).trimmed(),
            Angle::new(round_to(azimuth, 2), az_unit),
        ))
    }

    /// Live-Vorschau der Hauptachse: Distanz und Azimut folgen dem Cursor.
    ///
    /// Werte werden nur übernommen, wenn Punkt 2 und Umriss erzeugt werden
    /// konnten; sonst bleibt der Zustand unverändert.
    fn preview_major_axis(
        &mut self,
        anchor: DVec2,
        pos: DVec2,
        engine: &dyn GeodeticEngine,
    ) -> ToolAction {
        let Some((distance, azimuth)) = self.measure_from_anchor(anchor, pos, engine) else {
            log::debug!("Ellipse: Hauptachsen-Vorschau ohne Messung unterdrückt");
            return ToolAction::Ignored;
        };
        let below_minor = self.minor.is_usable() && distance.meters() < self.minor.valid.meters();
        if validate_distance(MAJOR_AXIS, distance, self.settings.limit_m).is_err()
            || !distance.is_set()
            || below_minor
        {
            self.preview.outlines.clear();
            return ToolAction::Ignored;
        }
        let Ok(Some(point2)) = derive_axis_point(engine, Some(anchor), distance, azimuth.degrees())
        else {
            log::debug!("Ellipse: Punkt 2 für Vorschau nicht ableitbar");
            return ToolAction::Ignored;
        };
        // Nebenachse bleibt in dieser Phase unberücksichtigt
        let Some(outline) = ellipse_outline(
            engine,
            anchor,
            distance,
            distance,
            azimuth.degrees(),
            self.settings.preview_densify,
        ) else {
            log::debug!("Ellipse: Vorschau-Umriss nicht erzeugbar");
            return ToolAction::Ignored;
        };

        self.major.commit(distance);
        self.azimuth = Some(azimuth);
        self.point2 = Some(point2);
        self.preview.clear();
        self.preview.markers.extend([anchor, point2]);
        self.preview.outlines.push(outline);
        self.refresh_axis_fields();
        self.refresh_azimuth_field();
        ToolAction::UpdatePreview
    }

    /// Live-Vorschau der Nebenachse: nur solange Hauptachse > Nebenachse.
    fn preview_minor_axis(
        &mut self,
        anchor: DVec2,
        pos: DVec2,
        engine: &dyn GeodeticEngine,
    ) -> ToolAction {
        if !self.major.is_usable() {
            return ToolAction::Ignored;
        }
        let major = self.major.valid;
        let Some(m) = engine.measure(anchor, pos, major.unit) else {
            log::debug!("Ellipse: Nebenachsen-Vorschau ohne Messung unterdrückt");
            return ToolAction::Ignored;
        };
        let minor = Distance::new(m.length, major.unit);
        if minor.value >= major.value {
            self.preview.outlines.clear();
            return ToolAction::Ignored;
        }
        let Some(outline) = ellipse_outline(
            engine,
            anchor,
            major,
            minor,
            self.azimuth_deg(),
            self.settings.preview_densify,
        ) else {
            log::debug!("Ellipse: Vorschau-Umriss nicht erzeugbar");
            return ToolAction::Ignored;
        };

        self.minor.commit(
            Distance::new(
                minor.in_unit(self.settings.linear_unit),
                self.settings.linear_unit,
            )
            .trimmed(),
        );
        self.preview.outlines.clear();
        self.preview.outlines.push(outline);
        self.refresh_axis_fields();
        ToolAction::UpdatePreview
    }

    /// Zweiter Klick: fixiert Hauptachse und Azimut.
    fn commit_major_axis(
        &mut self,
        anchor: DVec2,
        pos: DVec2,
        engine: &dyn GeodeticEngine,
    ) -> Result<ToolAction, ShapeError> {
        let (distance, azimuth) = self
            .measure_from_anchor(anchor, pos, engine)
            .ok_or(ShapeError::GeometryConstruction("Messung der Hauptachse"))?;
        validate_azimuth(azimuth)?;
        self.set_major_axis(distance, engine)?;
        self.set_azimuth(azimuth, engine)?;
        self.phase = Phase::MajorAxisPreview;
        log::debug!("Ellipse: Hauptachse fixiert → MajorAxisPreview");
        Ok(ToolAction::Continue)
    }

    /// Dritter Klick: legt die Nebenachse fest, falls sie die Hauptachse nicht übersteigt.
    fn commit_minor_axis(
        &mut self,
        anchor: DVec2,
        pos: DVec2,
        engine: &dyn GeodeticEngine,
    ) -> Result<ToolAction, ShapeError> {
        let major = self.major.valid;
        let m = engine
            .measure(anchor, pos, major.unit)
            .ok_or(ShapeError::GeometryConstruction("Messung der Nebenachse"))?;
        if !self.major.is_usable() || m.length > major.value {
            log::debug!("Ellipse: dritter Punkt jenseits der Hauptachse ignoriert");
            return Ok(ToolAction::Ignored);
        }
        let unit = self.settings.linear_unit;
        let minor = Distance::new(Distance::new(m.length, major.unit).in_unit(unit), unit);
        self.set_minor_axis(minor, engine)?;
        self.point3 = Some(pos);
        self.phase = Phase::ReadyToFinalize;
        // Marker für Punkt 3 ergänzen
        let _ = self.refresh_preview(engine);
        log::debug!("Ellipse: Nebenachse fixiert → ReadyToFinalize");
        Ok(ToolAction::ReadyToExecute)
    }

    fn mirror_mut(&mut self, field: ShapeField) -> Result<&mut FieldMirror, ShapeError> {
        match field {
            ShapeField::MajorAxis => Ok(&mut self.major_field),
            ShapeField::MinorAxis => Ok(&mut self.minor_field),
            ShapeField::Azimuth => Ok(&mut self.azimuth_field),
            other => Err(ShapeError::UnknownField(other.name())),
        }
    }

    fn summary(&self, center: DVec2) -> EllipseSummary {
        let unit = self.settings.linear_unit;
        EllipseSummary {
            center,
            major_display: self.display_axis(self.major.valid),
            minor_display: self.display_axis(self.minor.valid),
            major_full: self.major.valid.in_unit(unit) * 2.0,
            minor_full: self.minor.valid.in_unit(unit) * 2.0,
            azimuth: self
                .azimuth
                .map_or(0.0, |a| a.in_unit(self.settings.azimuth_unit)),
            linear_unit: unit,
            azimuth_unit: self.settings.azimuth_unit,
        }
    }
}

impl ShapeTool for EllipseTool {
    fn name(&self) -> &str {
        "Ellipse"
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn description(&self) -> &str {
        "Geodätische Ellipse aus Mittelpunkt, Hauptachse, Azimut und Nebenachse"
    }

    fn status_text(&self) -> &str {
        match self.phase {
            Phase::Empty => "Mittelpunkt klicken",
            Phase::AnchorSet => "Ende der Hauptachse klicken oder Werte eingeben",
            Phase::MajorAxisPreview => "Nebenachse klicken oder Enter übernimmt eingegebene Werte",
            Phase::ReadyToFinalize => "Bereit: Enter zum Abschließen, Escape zum Abbrechen",
        }
    }

    crate::impl_settings_delegation!();

    fn on_click(&mut self, pos: DVec2, ctx: &ToolContext<'_>) -> Result<ToolAction, ShapeError> {
        check_area(pos, ctx.area)?;
        match (self.phase, self.anchor) {
            (Phase::Empty, _) | (_, None) => {
                self.set_anchor(pos, ctx.engine);
                self.phase = Phase::AnchorSet;
                log::debug!("Ellipse: Mittelpunkt gesetzt → AnchorSet");
                Ok(ToolAction::Continue)
            }
            (Phase::AnchorSet, Some(anchor)) => self.commit_major_axis(anchor, pos, ctx.engine),
            (Phase::MajorAxisPreview, Some(anchor)) => {
                self.commit_minor_axis(anchor, pos, ctx.engine)
            }
            (Phase::ReadyToFinalize, Some(_)) => Ok(ToolAction::Ignored),
        }
    }

    fn on_mouse_move(&mut self, pos: DVec2, ctx: &ToolContext<'_>) -> ToolAction {
        match (self.phase, self.anchor) {
            (Phase::AnchorSet, Some(anchor)) => self.preview_major_axis(anchor, pos, ctx.engine),
            (Phase::MajorAxisPreview, Some(anchor)) => {
                self.preview_minor_axis(anchor, pos, ctx.engine)
            }
            _ => ToolAction::Ignored,
        }
    }

    fn on_enter(&mut self, ctx: &ToolContext<'_>) -> Result<ToolAction, ShapeError> {
        let Some(anchor) = self.anchor else {
            return Err(ShapeError::IncompleteShape("Mittelpunkt fehlt"));
        };
        if !self.major.is_usable() {
            return Err(ShapeError::IncompleteShape("Hauptachse fehlt"));
        }
        if !self.minor.is_usable() {
            return Err(ShapeError::IncompleteShape("Nebenachse fehlt"));
        }
        if self.point3.is_none() {
            self.point3 =
                derive_axis_point(ctx.engine, Some(anchor), self.minor.valid, self.azimuth_deg())?;
        }
        self.phase = Phase::ReadyToFinalize;
        log::debug!("Ellipse: Enter → ReadyToFinalize");
        Ok(ToolAction::ReadyToExecute)
    }

    fn execute(&self, ctx: &ToolContext<'_>) -> Result<ToolResult, ShapeError> {
        if self.phase != Phase::ReadyToFinalize {
            return Err(ShapeError::IncompleteShape("Ellipse noch nicht vollständig"));
        }
        let anchor = self
            .anchor
            .ok_or(ShapeError::IncompleteShape("Mittelpunkt fehlt"))?;
        let outline = ellipse_outline(
            ctx.engine,
            anchor,
            self.major.valid,
            self.minor.valid,
            self.azimuth_deg(),
            self.settings.final_densify,
        )
        .ok_or(ShapeError::GeometryConstruction("Ellipsen-Umriss"))?;
        Ok(build_result(outline, &self.summary(anchor)))
    }

    fn reset(&mut self) {
        self.clear_construction();
    }

    fn is_ready(&self) -> bool {
        self.phase == Phase::ReadyToFinalize
    }

    fn has_pending_input(&self) -> bool {
        self.phase != Phase::Empty
    }

    fn anchor(&self) -> Option<DVec2> {
        self.anchor
    }

    fn fields(&self) -> &'static [ShapeField] {
        FIELDS
    }

    fn set_field_value(
        &mut self,
        field: ShapeField,
        value: f64,
        ctx: &ToolContext<'_>,
    ) -> Result<(), ShapeError> {
        match field {
            ShapeField::MajorAxis => self.set_major_axis(self.axis_from_display(value), ctx.engine),
            ShapeField::MinorAxis => self.set_minor_axis(self.axis_from_display(value), ctx.engine),
            ShapeField::Azimuth => self.set_azimuth(
                Angle::new(value, self.settings.azimuth_unit),
                ctx.engine,
            ),
            other => Err(ShapeError::UnknownField(other.name())),
        }
    }

    fn set_field_text(
        &mut self,
        field: ShapeField,
        text: &str,
        ctx: &ToolContext<'_>,
    ) -> Result<(), ShapeError> {
        let Some(value) = self.mirror_mut(field)?.take_text(text)? else {
            return Ok(());
        };
        match field {
            ShapeField::MajorAxis => self.apply_major(self.axis_from_display(value), ctx.engine),
            ShapeField::MinorAxis => self.apply_minor(self.axis_from_display(value), ctx.engine),
            _ => self.apply_azimuth(Angle::new(value, self.settings.azimuth_unit), ctx.engine),
        }?;
        self.mirror_mut(field)?.mark_applied();
        Ok(())
    }

    fn field_text(&self, field: ShapeField) -> Option<&str> {
        match field {
            ShapeField::MajorAxis => Some(self.major_field.text()),
            ShapeField::MinorAxis => Some(self.minor_field.text()),
            ShapeField::Azimuth => Some(self.azimuth_field.text()),
            _ => None,
        }
    }

    fn set_linear_unit(&mut self, unit: LinearUnit) {
        self.settings.linear_unit = unit;
        self.refresh_axis_fields();
    }

    fn set_azimuth_unit(&mut self, unit: AzimuthUnit) {
        self.settings.azimuth_unit = unit;
        self.refresh_azimuth_field();
    }

    fn set_ellipse_mode(&mut self, mode: EllipseMode) {
        EllipseTool::set_ellipse_mode(self, mode);
    }

    fn apply_options(
        &mut self,
        opts: &ToolOptions,
        ctx: &ToolContext<'_>,
    ) -> Result<(), ShapeError> {
        self.settings.linear_unit = opts.linear_unit;
        self.settings.azimuth_unit = opts.azimuth_unit;
        self.settings.ellipse_mode = opts.ellipse_mode;
        let limit_changed = self.settings.apply_limits(opts);
        self.refresh_axis_fields();
        self.refresh_azimuth_field();
        if limit_changed {
            self.revalidate(ctx.engine)
        } else {
            Ok(())
        }
    }
}
