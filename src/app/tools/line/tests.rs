use super::super::common::{Angle, Distance};
use super::super::test_support::{ctx, offset, RecordingEngine};
use super::super::{ShapeField, ShapeKind, ShapeTool, ToolAction};
use super::{LineTool, Phase};
use crate::core::{AzimuthUnit, GeodeticEngine, LinearUnit};
use crate::shared::{ShapeError, ToolOptions};
use approx::assert_relative_eq;
use glam::DVec2;

fn tool_with_start(engine: &RecordingEngine, start: DVec2) -> LineTool {
    let mut tool = LineTool::new();
    assert_eq!(
        tool.on_click(start, &ctx(engine)).unwrap(),
        ToolAction::Continue
    );
    assert_eq!(tool.phase(), Phase::StartSet);
    tool
}

#[test]
fn test_two_clicks_finalize_line() {
    let engine = RecordingEngine::default();
    let c = ctx(&engine);
    let start = DVec2::new(8.0, 47.0);
    let mut tool = tool_with_start(&engine, start);
    let end = offset(start, 5000.0, 45.0);

    assert_eq!(tool.on_click(end, &c).unwrap(), ToolAction::ReadyToExecute);
    assert_eq!(tool.phase(), Phase::ReadyToFinalize);
    assert_eq!(tool.end(), Some(end));
    assert_eq!(tool.field_text(ShapeField::Distance), Some("5000"));
    assert_eq!(tool.field_text(ShapeField::Azimuth), Some("45"));

    let result = tool.execute(&c).unwrap();
    assert_eq!(result.kind, ShapeKind::Line);
    let line = &result.geometries[0];
    assert_eq!(line.from_point(), Some(start));
    assert_eq!(line.to_point(), Some(end));
    assert_relative_eq!(result.number("distance").unwrap(), 5000.0, max_relative = 1e-6);
    assert_eq!(result.number("azimuth"), Some(45.0));
    assert_eq!(result.number("startX"), Some(8.0));
    assert_eq!(result.number("endY"), Some(end.y));
    assert_eq!(result.text("distanceUnitLabel"), Some("Meters"));
    assert!(result.label.is_none());
}

#[test]
fn test_click_on_start_is_ignored() {
    let engine = RecordingEngine::default();
    let start = DVec2::new(8.0, 47.0);
    let mut tool = tool_with_start(&engine, start);
    assert_eq!(
        tool.on_click(start, &ctx(&engine)).unwrap(),
        ToolAction::Ignored
    );
    assert_eq!(tool.phase(), Phase::StartSet);
}

#[test]
fn test_typed_values_derive_end_point() {
    let engine = RecordingEngine::default();
    let c = ctx(&engine);
    let start = DVec2::new(-3.0, 40.0);
    let mut tool = tool_with_start(&engine, start);
    tool.set_field_value(ShapeField::Azimuth, 120.0, &c).unwrap();
    tool.set_field_value(ShapeField::Distance, 2500.0, &c).unwrap();

    let end = tool.end().expect("abgeleiteter Endpunkt erwartet");
    let m = engine.measure(start, end, LinearUnit::Meters).unwrap();
    assert_relative_eq!(m.length, 2500.0, max_relative = 1e-9);
    assert!((m.initial_bearing_deg - 120.0).abs() < 1e-6);
    assert_eq!(tool.preview().outlines.len(), 1);

    assert_eq!(tool.on_enter(&c).unwrap(), ToolAction::ReadyToExecute);
    assert!(tool.is_ready());
    assert!(tool.execute(&c).is_ok());
}

#[test]
fn test_enter_requires_start_and_distance() {
    let engine = RecordingEngine::default();
    let c = ctx(&engine);
    let mut tool = LineTool::new();
    assert!(matches!(
        tool.on_enter(&c),
        Err(ShapeError::IncompleteShape(_))
    ));
    tool.on_click(DVec2::new(1.0, 1.0), &c).unwrap();
    assert!(matches!(
        tool.on_enter(&c),
        Err(ShapeError::IncompleteShape(_))
    ));
    assert!(matches!(
        tool.execute(&c),
        Err(ShapeError::IncompleteShape(_))
    ));
}

#[test]
fn test_distance_limit_and_sign() {
    let engine = RecordingEngine::default();
    let mut tool = tool_with_start(&engine, DVec2::new(8.0, 47.0));
    tool.set_distance(Distance::new(1000.0, LinearUnit::Meters), &engine)
        .unwrap();
    assert!(!tool.preview().is_empty());

    let raw = Distance::new(12_500.0, LinearUnit::NauticalMiles);
    assert!(matches!(
        tool.set_distance(raw, &engine),
        Err(ShapeError::LimitExceeded { .. })
    ));
    assert!(tool.preview().is_empty());
    assert_eq!(tool.pending_distance(), Some(raw));
    assert_eq!(tool.distance().value, 1000.0);

    assert!(matches!(
        tool.set_distance(Distance::new(-5.0, LinearUnit::Meters), &engine),
        Err(ShapeError::OutOfRange { .. })
    ));
    assert!(matches!(
        tool.set_azimuth(Angle::new(400.5, AzimuthUnit::Gradians), &engine),
        Err(ShapeError::OutOfRange { .. })
    ));
}

#[test]
fn test_mouse_move_previews_and_fills_fields() {
    let engine = RecordingEngine::default();
    let c = ctx(&engine);
    let start = DVec2::new(8.0, 47.0);
    let mut tool = tool_with_start(&engine, start);

    let cursor = offset(start, 1200.0, 270.0);
    assert_eq!(tool.on_mouse_move(cursor, &c), ToolAction::UpdatePreview);
    assert_eq!(tool.field_text(ShapeField::Distance), Some("1200"));
    assert_eq!(tool.field_text(ShapeField::Azimuth), Some("270"));
    assert_eq!(tool.preview().markers, vec![start, cursor]);

    // Cursor auf dem Startpunkt: keine Linie
    assert_eq!(tool.on_mouse_move(start, &c), ToolAction::Ignored);
    assert!(tool.preview().outlines.is_empty());

    engine.fail_destination.set(true);
    assert_eq!(
        tool.on_mouse_move(offset(start, 900.0, 10.0), &c),
        ToolAction::Ignored
    );
    assert_eq!(tool.field_text(ShapeField::Distance), Some("1200"));
}

#[test]
fn test_mouse_move_ignored_without_start() {
    let engine = RecordingEngine::default();
    let mut tool = LineTool::new();
    assert_eq!(
        tool.on_mouse_move(DVec2::new(1.0, 1.0), &ctx(&engine)),
        ToolAction::Ignored
    );
    assert!(tool.preview().is_empty());
}

#[test]
fn test_unit_change_and_unknown_field() {
    let engine = RecordingEngine::default();
    let c = ctx(&engine);
    let mut tool = LineTool::new();
    tool.set_field_text(ShapeField::Distance, "2,5", &c).unwrap();
    assert_eq!(tool.distance(), Distance::new(2.5, LinearUnit::Meters));

    tool.set_linear_unit(LinearUnit::Feet);
    assert_eq!(tool.field_text(ShapeField::Distance), Some("8.2"));
    assert_eq!(tool.distance().unit, LinearUnit::Meters);

    assert!(matches!(
        tool.set_field_value(ShapeField::MajorAxis, 1.0, &c),
        Err(ShapeError::UnknownField(_))
    ));
    assert!(tool.field_text(ShapeField::RingCount).is_none());
}

#[test]
fn test_raised_limit_accepts_pending_distance() {
    let engine = RecordingEngine::default();
    let c = ctx(&engine);
    let mut tool = tool_with_start(&engine, DVec2::new(0.0, 0.0));
    let raw = Distance::new(21_000.0, LinearUnit::Kilometers);
    assert!(tool.set_distance(raw, &engine).is_err());

    let opts = ToolOptions {
        major_axis_limit_m: 22_000_000.0,
        ..ToolOptions::default()
    };
    tool.apply_options(&opts, &c).unwrap();
    assert!(tool.pending_distance().is_none());
    assert_eq!(tool.distance(), raw);
    assert!(tool.end().is_some());
}

#[test]
fn test_lowered_limit_blocks_finalize_of_accepted_distance() {
    let engine = RecordingEngine::default();
    let c = ctx(&engine);
    let mut tool = tool_with_start(&engine, DVec2::new(8.0, 47.0));
    let distance = Distance::new(5_000.0, LinearUnit::Meters);
    tool.set_distance(distance, &engine).unwrap();
    assert_eq!(tool.on_enter(&c).unwrap(), ToolAction::ReadyToExecute);

    let lowered = ToolOptions {
        major_axis_limit_m: 1_000.0,
        ..ToolOptions::default()
    };
    assert!(matches!(
        tool.apply_options(&lowered, &c),
        Err(ShapeError::LimitExceeded { .. })
    ));
    assert_eq!(tool.pending_distance(), Some(distance));
    assert_eq!(tool.phase(), Phase::StartSet);
    assert!(tool.preview().outlines.is_empty());
    assert!(tool.execute(&c).is_err());
    assert!(matches!(
        tool.on_enter(&c),
        Err(ShapeError::IncompleteShape(_))
    ));
}

#[test]
fn test_mouse_preview_stores_trimmed_distance() {
    let engine = RecordingEngine::default();
    let c = ctx(&engine);
    let start = DVec2::new(8.0, 47.0);
    let mut tool = tool_with_start(&engine, start);
    assert_eq!(
        tool.on_mouse_move(offset(start, 2345.678_912_34, 33.0), &c),
        ToolAction::UpdatePreview
    );
    let distance = tool.distance();
    assert_eq!(distance, distance.trimmed());
    assert_relative_eq!(distance.value, 2345.678_912, max_relative = 1e-6);
}

#[test]
fn test_reset_clears_points() {
    let engine = RecordingEngine::default();
    let c = ctx(&engine);
    let start = DVec2::new(8.0, 47.0);
    let mut tool = tool_with_start(&engine, start);
    tool.on_click(offset(start, 100.0, 0.0), &c).unwrap();
    tool.reset();
    assert_eq!(tool.phase(), Phase::Empty);
    assert!(tool.anchor().is_none());
    assert!(tool.end().is_none());
    assert_eq!(tool.field_text(ShapeField::Distance), Some(""));
    assert!(!tool.has_pending_input());
}
