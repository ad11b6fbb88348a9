//! Lifecycle-Methoden des LineTool.
//!
//! Zustandsfolge: `Empty → StartSet → ReadyToFinalize`.

use super::super::common::{
    derive_axis_point, round_to, validate_distance, Angle, Distance, FieldMirror,
};
use super::super::{
    check_area, ShapeField, ShapeKind, ShapeTool, ToolAction, ToolContext, ToolResult,
};
use super::geometry::{build_result, LineSummary};
use super::state::{LineTool, Phase, DISTANCE};
use crate::core::{convert_azimuth, AzimuthUnit, GeodeticEngine, LinearUnit};
use crate::shared::{ShapeError, ToolOptions};
use glam::DVec2;

const FIELDS: &[ShapeField] = &[ShapeField::Distance, ShapeField::Azimuth];

impl LineTool {
    fn measure_from_start(
        &self,
        start: DVec2,
        pos: DVec2,
        engine: &dyn GeodeticEngine,
    ) -> Option<(Distance, Angle)> {
        let unit = self.settings.linear_unit;
        let az_unit = self.settings.azimuth_unit;
        let m = engine.measure(start, pos, unit)?;
        let azimuth = convert_azimuth(m.initial_bearing_deg, AzimuthUnit::Degrees, az_unit);
        Some((
            Distance::new(m.length, unit).trimmed(),
            Angle::new(round_to(azimuth, 2), az_unit),
        ))
    }

    /// Live-Vorschau: Linie zum Cursor, Distanz und Azimut folgen.
    fn preview_to_cursor(
        &mut self,
        start: DVec2,
        pos: DVec2,
        engine: &dyn GeodeticEngine,
    ) -> ToolAction {
        let Some((distance, azimuth)) = self.measure_from_start(start, pos, engine) else {
            log::debug!("Linie: Vorschau ohne Messung unterdrückt");
            return ToolAction::Ignored;
        };
        if validate_distance(DISTANCE, distance, self.settings.limit_m).is_err()
            || !distance.is_set()
        {
            self.preview.outlines.clear();
            return ToolAction::Ignored;
        }
        let Some(line) =
            engine.geodesic_line(start, pos, distance.unit, self.settings.line_densify)
        else {
            log::debug!("Linie: Vorschau-Linie nicht erzeugbar");
            return ToolAction::Ignored;
        };

        self.distance.commit(distance);
        self.azimuth = Some(azimuth);
        self.end = Some(pos);
        self.preview.clear();
        self.preview.markers.extend([start, pos]);
        self.preview.outlines.push(line);
        self.refresh_distance_field();
        self.refresh_azimuth_field();
        ToolAction::UpdatePreview
    }

    fn mirror_mut(&mut self, field: ShapeField) -> Result<&mut FieldMirror, ShapeError> {
        match field {
            ShapeField::Distance => Ok(&mut self.distance_field),
            ShapeField::Azimuth => Ok(&mut self.azimuth_field),
            other => Err(ShapeError::UnknownField(other.name())),
        }
    }

    /// Zweiter Klick: Endpunkt festlegen.
    fn commit_end(
        &mut self,
        start: DVec2,
        pos: DVec2,
        engine: &dyn GeodeticEngine,
    ) -> Result<ToolAction, ShapeError> {
        let (distance, azimuth) = self
            .measure_from_start(start, pos, engine)
            .ok_or(ShapeError::GeometryConstruction("Messung der Linie"))?;
        if !distance.is_set() {
            log::debug!("Linie: Endpunkt gleich Startpunkt ignoriert");
            return Ok(ToolAction::Ignored);
        }
        self.set_distance(distance, engine)?;
        self.set_azimuth(azimuth, engine)?;
        // Geklickter Punkt ist maßgeblich, nicht der gerundet abgeleitete
        self.end = Some(pos);
        self.refresh_preview(engine)?;
        self.phase = Phase::ReadyToFinalize;
        log::debug!("Linie: Endpunkt gesetzt → ReadyToFinalize");
        Ok(ToolAction::ReadyToExecute)
    }
}

impl ShapeTool for LineTool {
    fn name(&self) -> &str {
        "Linie"
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn description(&self) -> &str {
        "Geodätische Linie aus Startpunkt, Distanz und Azimut"
    }

    fn status_text(&self) -> &str {
        match self.phase {
            Phase::Empty => "Startpunkt klicken",
            Phase::StartSet => "Endpunkt klicken oder Distanz/Azimut eingeben",
            Phase::ReadyToFinalize => "Bereit: Enter zum Abschließen, Escape zum Abbrechen",
        }
    }

    crate::impl_settings_delegation!();

    fn on_click(&mut self, pos: DVec2, ctx: &ToolContext<'_>) -> Result<ToolAction, ShapeError> {
        check_area(pos, ctx.area)?;
        match (self.phase, self.start) {
            (Phase::Empty, _) | (_, None) => {
                self.set_start(pos, ctx.engine);
                self.phase = Phase::StartSet;
                log::debug!("Linie: Startpunkt gesetzt → StartSet");
                Ok(ToolAction::Continue)
            }
            (Phase::StartSet, Some(start)) => self.commit_end(start, pos, ctx.engine),
            (Phase::ReadyToFinalize, Some(_)) => Ok(ToolAction::Ignored),
        }
    }

    fn on_mouse_move(&mut self, pos: DVec2, ctx: &ToolContext<'_>) -> ToolAction {
        match (self.phase, self.start) {
            (Phase::StartSet, Some(start)) => self.preview_to_cursor(start, pos, ctx.engine),
            _ => ToolAction::Ignored,
        }
    }

    fn on_enter(&mut self, ctx: &ToolContext<'_>) -> Result<ToolAction, ShapeError> {
        let Some(start) = self.start else {
            return Err(ShapeError::IncompleteShape("Startpunkt fehlt"));
        };
        if !self.distance.is_usable() {
            return Err(ShapeError::IncompleteShape("Distanz fehlt"));
        }
        if self.end.is_none() {
            self.end = derive_axis_point(
                ctx.engine,
                Some(start),
                self.distance.valid,
                self.azimuth_deg(),
            )?;
        }
        self.phase = Phase::ReadyToFinalize;
        log::debug!("Linie: Enter → ReadyToFinalize");
        Ok(ToolAction::ReadyToExecute)
    }

    fn execute(&self, ctx: &ToolContext<'_>) -> Result<ToolResult, ShapeError> {
        if self.phase != Phase::ReadyToFinalize {
            return Err(ShapeError::IncompleteShape("Linie noch nicht vollständig"));
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(ShapeError::IncompleteShape("Endpunkt fehlt"));
        };
        let line = ctx
            .engine
            .geodesic_line(start, end, self.distance.valid.unit, self.settings.line_densify)
            .ok_or(ShapeError::GeometryConstruction("Geodätische Linie"))?;
        let summary = LineSummary {
            start,
            end,
            distance: self.distance.valid.in_unit(self.settings.linear_unit),
            azimuth: self
                .azimuth
                .map_or(0.0, |a| a.in_unit(self.settings.azimuth_unit)),
            linear_unit: self.settings.linear_unit,
            azimuth_unit: self.settings.azimuth_unit,
        };
        Ok(build_result(line, &summary))
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
        self.start
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
            ShapeField::Distance => self.set_distance(
                Distance::new(value, self.settings.linear_unit),
                ctx.engine,
            ),
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
        if field == ShapeField::Distance {
            self.apply_distance(Distance::new(value, self.settings.linear_unit), ctx.engine)?;
        } else {
            self.apply_azimuth(Angle::new(value, self.settings.azimuth_unit), ctx.engine)?;
        }
        self.mirror_mut(field)?.mark_applied();
        Ok(())
    }

    fn field_text(&self, field: ShapeField) -> Option<&str> {
        match field {
            ShapeField::Distance => Some(self.distance_field.text()),
            ShapeField::Azimuth => Some(self.azimuth_field.text()),
            _ => None,
        }
    }

    fn set_linear_unit(&mut self, unit: LinearUnit) {
        self.settings.linear_unit = unit;
        self.refresh_distance_field();
    }

    fn set_azimuth_unit(&mut self, unit: AzimuthUnit) {
        self.settings.azimuth_unit = unit;
        self.refresh_azimuth_field();
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
        self.refresh_distance_field();
        self.refresh_azimuth_field();
        if limit_changed {
            self.revalidate(ctx.engine)
        } else {
            Ok(())
        }
    }
}
