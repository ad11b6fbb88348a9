//! Lifecycle-Methoden des RangeRingsTool.
//!
//! Zustandsfolge: `Empty → CenterSet → ReadyToFinalize`.

use super::super::common::{validate_distance, Distance, FieldMirror};
use super::super::{
    check_area, ShapeField, ShapeKind, ShapeTool, ToolAction, ToolContext, ToolResult,
};
use super::geometry::{build_result, build_rings};
use super::state::{
    validate_count, Phase, RangeRingsTool, MAX_RADIAL_COUNT, MAX_RING_COUNT, RADIAL_COUNT,
    RING_COUNT, RING_INTERVAL,
};
use crate::core::{AzimuthUnit, GeodeticEngine, LinearUnit};
use crate::shared::{ShapeError, ToolOptions};
use glam::DVec2;

const FIELDS: &[ShapeField] = &[
    ShapeField::RingCount,
    ShapeField::RingInterval,
    ShapeField::RadialCount,
];

impl RangeRingsTool {
    fn measure_from_center(
        &self,
        center: DVec2,
        pos: DVec2,
        engine: &dyn GeodeticEngine,
    ) -> Option<Distance> {
        let unit = self.settings.linear_unit;
        let m = engine.measure(center, pos, unit)?;
        Some(Distance::new(m.length, unit).trimmed())
    }

    /// Live-Vorschau: Cursor-Abstand zum Mittelpunkt wird Ring-Abstand.
    fn preview_interval(
        &mut self,
        center: DVec2,
        pos: DVec2,
        engine: &dyn GeodeticEngine,
    ) -> ToolAction {
        let Some(interval) = self.measure_from_center(center, pos, engine) else {
            log::debug!("Entfernungsringe: Vorschau ohne Messung unterdrückt");
            return ToolAction::Ignored;
        };
        let outer = Distance::new(interval.value * self.ring_count as f64, interval.unit);
        if validate_distance(RING_INTERVAL, outer, self.settings.limit_m).is_err()
            || !interval.is_set()
        {
            self.preview.outlines.clear();
            return ToolAction::Ignored;
        }
        let previous = self.interval;
        self.interval.commit(interval);
        let Some(geometries) = build_rings(
            engine,
            &self.layout(center),
            self.settings.preview_densify,
            self.settings.line_densify,
        ) else {
            self.interval = previous;
            log::debug!("Entfernungsringe: Vorschau-Geometrie nicht erzeugbar");
            return ToolAction::Ignored;
        };

        self.preview.clear();
        self.preview.markers.push(center);
        self.preview.outlines = geometries;
        self.refresh_interval_field();
        ToolAction::UpdatePreview
    }

    fn mirror_mut(&mut self, field: ShapeField) -> Result<&mut FieldMirror, ShapeError> {
        match field {
            ShapeField::RingCount => Ok(&mut self.ring_count_field),
            ShapeField::RingInterval => Ok(&mut self.interval_field),
            ShapeField::RadialCount => Ok(&mut self.radial_count_field),
            other => Err(ShapeError::UnknownField(other.name())),
        }
    }

    /// Zweiter Klick: Ring-Abstand festlegen.
    fn commit_interval(
        &mut self,
        center: DVec2,
        pos: DVec2,
        engine: &dyn GeodeticEngine,
    ) -> Result<ToolAction, ShapeError> {
        let interval = self
            .measure_from_center(center, pos, engine)
            .ok_or(ShapeError::GeometryConstruction("Messung des Ring-Abstands"))?;
        if !interval.is_set() {
            log::debug!("Entfernungsringe: Klick auf Mittelpunkt ignoriert");
            return Ok(ToolAction::Ignored);
        }
        self.set_interval(interval, engine)?;
        self.phase = Phase::ReadyToFinalize;
        log::debug!("Entfernungsringe: Abstand fixiert → ReadyToFinalize");
        Ok(ToolAction::ReadyToExecute)
    }
}

impl ShapeTool for RangeRingsTool {
    fn name(&self) -> &str {
        "Entfernungsringe"
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::RangeRings
    }

    fn description(&self) -> &str {
        "Konzentrische geodätische Ringe mit optionalen Radialen"
    }

    fn status_text(&self) -> &str {
        match self.phase {
            Phase::Empty => "Mittelpunkt klicken",
            Phase::CenterSet => "Ring-Abstand klicken oder Werte eingeben",
            Phase::ReadyToFinalize => "Bereit: Enter zum Abschließen, Escape zum Abbrechen",
        }
    }

    crate::impl_settings_delegation!();

    fn on_click(&mut self, pos: DVec2, ctx: &ToolContext<'_>) -> Result<ToolAction, ShapeError> {
        check_area(pos, ctx.area)?;
        match (self.phase, self.center) {
            (Phase::Empty, _) | (_, None) => {
                self.set_center(pos, ctx.engine);
                self.phase = Phase::CenterSet;
                log::debug!("Entfernungsringe: Mittelpunkt gesetzt → CenterSet");
                Ok(ToolAction::Continue)
            }
            (Phase::CenterSet, Some(center)) => self.commit_interval(center, pos, ctx.engine),
            (Phase::ReadyToFinalize, Some(_)) => Ok(ToolAction::Ignored),
        }
    }

    fn on_mouse_move(&mut self, pos: DVec2, ctx: &ToolContext<'_>) -> ToolAction {
        match (self.phase, self.center) {
            (Phase::CenterSet, Some(center)) => self.preview_interval(center, pos, ctx.engine),
            _ => ToolAction::Ignored,
        }
    }

    fn on_enter(&mut self, _ctx: &ToolContext<'_>) -> Result<ToolAction, ShapeError> {
        if self.center.is_none() {
            return Err(ShapeError::IncompleteShape("Mittelpunkt fehlt"));
        }
        if !self.interval.is_usable() {
            return Err(ShapeError::IncompleteShape("Ring-Abstand fehlt"));
        }
        self.phase = Phase::ReadyToFinalize;
        log::debug!("Entfernungsringe: Enter → ReadyToFinalize");
        Ok(ToolAction::ReadyToExecute)
    }

    fn execute(&self, ctx: &ToolContext<'_>) -> Result<ToolResult, ShapeError> {
        if self.phase != Phase::ReadyToFinalize {
            return Err(ShapeError::IncompleteShape(
                "Entfernungsringe noch nicht vollständig",
            ));
        }
        let center = self
            .center
            .ok_or(ShapeError::IncompleteShape("Mittelpunkt fehlt"))?;
        let layout = self.layout(center);
        let geometries = build_rings(
            ctx.engine,
            &layout,
            self.settings.final_densify,
            self.settings.line_densify,
        )
        .ok_or(ShapeError::GeometryConstruction("Entfernungsringe"))?;
        Ok(build_result(geometries, &layout, self.settings.linear_unit))
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
        self.center
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
            ShapeField::RingCount => {
                let count = validate_count(RING_COUNT, value, 1, MAX_RING_COUNT)?;
                self.set_ring_count(count, ctx.engine)
            }
            ShapeField::RingInterval => self.set_interval(
                Distance::new(value, self.settings.linear_unit),
                ctx.engine,
            ),
            ShapeField::RadialCount => {
                let count = validate_count(RADIAL_COUNT, value, 0, MAX_RADIAL_COUNT)?;
                self.set_radial_count(count, ctx.engine)
            }
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
            ShapeField::RingCount => {
                let count = validate_count(RING_COUNT, value, 1, MAX_RING_COUNT)?;
                self.apply_ring_count(count, ctx.engine)
            }
            ShapeField::RadialCount => {
                let count = validate_count(RADIAL_COUNT, value, 0, MAX_RADIAL_COUNT)?;
                self.apply_radial_count(count, ctx.engine)
            }
            _ => self.apply_interval(Distance::new(value, self.settings.linear_unit), ctx.engine),
        }?;
        self.mirror_mut(field)?.mark_applied();
        Ok(())
    }

    fn field_text(&self, field: ShapeField) -> Option<&str> {
        match field {
            ShapeField::RingCount => Some(self.ring_count_field.text()),
            ShapeField::RingInterval => Some(self.interval_field.text()),
            ShapeField::RadialCount => Some(self.radial_count_field.text()),
            _ => None,
        }
    }

    fn set_linear_unit(&mut self, unit: LinearUnit) {
        self.settings.linear_unit = unit;
        self.refresh_interval_field();
    }

    fn set_azimuth_unit(&mut self, unit: AzimuthUnit) {
        self.settings.azimuth_unit = unit;
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
        self.refresh_interval_field();
        if limit_changed {
            self.revalidate(ctx.engine)
        } else {
            Ok(())
        }
    }
}
