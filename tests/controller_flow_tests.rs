use dd_shape_builder::{
    AppCommand, AppController, AppIntent, AppState, AzimuthUnit, EllipsoidalEngine, GeoBounds,
    GeodeticEngine, LinearUnit, ShapeError, ShapeField, ShapeKind, ToolOptions, ToolResult,
};
use glam::DVec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Punkt in `distance_m` Metern unter `bearing_deg` vom Ursprung.
fn offset(origin: DVec2, distance_m: f64, bearing_deg: f64) -> DVec2 {
    EllipsoidalEngine::wgs84()
        .destination_point(origin, distance_m, LinearUnit::Meters, bearing_deg)
        .expect("Zielpunkt erwartet")
}

/// Controller, dessen Finalize-Callback alle Formen einsammelt.
fn recording_controller() -> (AppController, Rc<RefCell<Vec<ToolResult>>>) {
    let finished = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&finished);
    let mut controller = AppController::new();
    controller.set_finalize_callback(move |result| sink.borrow_mut().push(result.clone()));
    (controller, finished)
}

fn send(controller: &mut AppController, state: &mut AppState, intent: AppIntent) {
    controller
        .handle_intent(state, intent)
        .expect("Intent sollte ohne Fehler durchlaufen");
}

fn shape_error(err: &anyhow::Error) -> &ShapeError {
    err.downcast_ref::<ShapeError>()
        .expect("ShapeError sollte durch anyhow durchgereicht werden")
}

#[test]
fn test_ellipse_from_typed_values_reaches_callback() {
    let (mut controller, finished) = recording_controller();
    let mut state = AppState::new();
    let center = DVec2::new(10.0, 50.0);

    send(&mut controller, &mut state, AppIntent::ToolSelected { kind: ShapeKind::Ellipse });
    send(&mut controller, &mut state, AppIntent::MapClicked { pos: center });
    for (field, value) in [
        (ShapeField::MajorAxis, 2000.0),
        (ShapeField::MinorAxis, 1000.0),
        (ShapeField::Azimuth, 30.0),
    ] {
        send(&mut controller, &mut state, AppIntent::FieldValueEntered { field, value });
    }
    send(&mut controller, &mut state, AppIntent::EnterPressed);

    let finished = finished.borrow();
    assert_eq!(finished.len(), 1);
    let shape = &finished[0];
    assert_eq!(shape.kind, ShapeKind::Ellipse);
    assert!(shape.geometries[0].is_closed());
    assert_eq!(shape.number("majorAxis"), Some(2000.0));
    assert_eq!(shape.number("minorAxis"), Some(1000.0));
    assert_eq!(
        shape.label.as_deref(),
        Some("Major Axis: 4000 Meters\nMinor Axis: 2000 Meters\nAngle: 30 Degrees")
    );
    assert_eq!(state.finished_shapes.len(), 1);

    // Tool ist nach dem Abschluss wieder leer
    let tool = state.editor.active_tool().expect("aktives Tool erwartet");
    assert!(tool.anchor().is_none());
    assert!(!tool.has_pending_input());
}

#[test]
fn test_ellipse_three_clicks_finalize() {
    let (mut controller, finished) = recording_controller();
    let mut state = AppState::new();
    let center = DVec2::new(-3.7, 40.4);

    send(&mut controller, &mut state, AppIntent::ToolSelected { kind: ShapeKind::Ellipse });
    send(&mut controller, &mut state, AppIntent::MapClicked { pos: center });
    send(
        &mut controller,
        &mut state,
        AppIntent::CursorMoved { pos: offset(center, 1200.0, 60.0) },
    );
    send(
        &mut controller,
        &mut state,
        AppIntent::MapClicked { pos: offset(center, 1500.0, 45.0) },
    );
    assert!(finished.borrow().is_empty());
    send(
        &mut controller,
        &mut state,
        AppIntent::MapClicked { pos: offset(center, 800.0, 135.0) },
    );

    let finished = finished.borrow();
    assert_eq!(finished.len(), 1);
    let major = finished[0].number("majorAxis").expect("majorAxis erwartet");
    let minor = finished[0].number("minorAxis").expect("minorAxis erwartet");
    assert!((major - 1500.0).abs() < 0.01);
    assert!((minor - 800.0).abs() < 0.01);
}

#[test]
fn test_shape_errors_pass_through_controller() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    let err = controller
        .handle_intent(&mut state, AppIntent::EnterPressed)
        .expect_err("ohne aktives Tool erwartet");
    assert!(err.downcast_ref::<ShapeError>().is_none());

    send(&mut controller, &mut state, AppIntent::ToolSelected { kind: ShapeKind::Ellipse });
    let err = controller
        .handle_intent(&mut state, AppIntent::EnterPressed)
        .expect_err("unvollständige Form erwartet");
    assert!(matches!(shape_error(&err), ShapeError::IncompleteShape(_)));

    let err = controller
        .handle_intent(
            &mut state,
            AppIntent::FieldValueEntered {
                field: ShapeField::MajorAxis,
                value: 25_000_000.0,
            },
        )
        .expect_err("Limit erwartet");
    assert!(matches!(shape_error(&err), ShapeError::LimitExceeded { .. }));

    let err = controller
        .handle_intent(
            &mut state,
            AppIntent::FieldTextEdited {
                field: ShapeField::Azimuth,
                text: "nord".to_string(),
            },
        )
        .expect_err("ungültiger Text erwartet");
    assert!(matches!(shape_error(&err), ShapeError::InvalidInput(_)));

    let err = controller
        .handle_intent(
            &mut state,
            AppIntent::FieldValueEntered {
                field: ShapeField::RingCount,
                value: 3.0,
            },
        )
        .expect_err("unbekanntes Feld erwartet");
    assert!(matches!(shape_error(&err), ShapeError::UnknownField(_)));
}

#[test]
fn test_click_outside_area_is_rejected() {
    let options = ToolOptions {
        area_of_interest: GeoBounds::from_corners(DVec2::new(5.0, 45.0), DVec2::new(15.0, 55.0)),
        ..ToolOptions::default()
    };
    let mut controller = AppController::new();
    let mut state = AppState::with_options(options);

    send(&mut controller, &mut state, AppIntent::ToolSelected { kind: ShapeKind::Line });
    let err = controller
        .handle_intent(&mut state, AppIntent::MapClicked { pos: DVec2::new(20.0, 50.0) })
        .expect_err("Klick außerhalb erwartet");
    assert!(matches!(shape_error(&err), ShapeError::OutOfArea { .. }));
    assert!(state.editor.active_tool().and_then(|t| t.anchor()).is_none());

    send(&mut controller, &mut state, AppIntent::MapClicked { pos: DVec2::new(10.0, 50.0) });
    assert_eq!(
        state.editor.active_tool().and_then(|t| t.anchor()),
        Some(DVec2::new(10.0, 50.0))
    );
}

#[test]
fn test_line_two_clicks() {
    let (mut controller, finished) = recording_controller();
    let mut state = AppState::new();
    let start = DVec2::new(8.0, 47.0);
    let end = offset(start, 5000.0, 90.0);

    send(&mut controller, &mut state, AppIntent::ToolSelected { kind: ShapeKind::Line });
    send(&mut controller, &mut state, AppIntent::MapClicked { pos: start });
    send(&mut controller, &mut state, AppIntent::CursorMoved { pos: end });
    let tool = state.editor.active_tool().expect("aktives Tool erwartet");
    assert_eq!(tool.field_text(ShapeField::Distance), Some("5000"));
    assert_eq!(tool.field_text(ShapeField::Azimuth), Some("90"));

    send(&mut controller, &mut state, AppIntent::MapClicked { pos: end });
    let finished = finished.borrow();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].kind, ShapeKind::Line);
    assert_eq!(finished[0].geometries[0].from_point(), Some(start));
    assert_eq!(finished[0].geometries[0].to_point(), Some(end));
}

#[test]
fn test_range_rings_flow_in_kilometers() {
    let (mut controller, finished) = recording_controller();
    let mut state = AppState::new();

    send(&mut controller, &mut state, AppIntent::LinearUnitSelected { unit: LinearUnit::Kilometers });
    send(&mut controller, &mut state, AppIntent::ToolSelected { kind: ShapeKind::RangeRings });
    send(&mut controller, &mut state, AppIntent::MapClicked { pos: DVec2::new(13.4, 52.5) });
    send(
        &mut controller,
        &mut state,
        AppIntent::FieldTextEdited {
            field: ShapeField::RingCount,
            text: "4".to_string(),
        },
    );
    send(
        &mut controller,
        &mut state,
        AppIntent::FieldValueEntered {
            field: ShapeField::RingInterval,
            value: 2.5,
        },
    );
    send(
        &mut controller,
        &mut state,
        AppIntent::FieldValueEntered {
            field: ShapeField::RadialCount,
            value: 8.0,
        },
    );
    send(&mut controller, &mut state, AppIntent::EnterPressed);

    let finished = finished.borrow();
    assert_eq!(finished.len(), 1);
    let rings = &finished[0];
    assert_eq!(rings.kind, ShapeKind::RangeRings);
    assert_eq!(rings.geometries.len(), 12);
    assert_eq!(rings.number("outerRadius"), Some(10.0));
    assert_eq!(rings.text("distanceUnitLabel"), Some("Kilometers"));
}

#[test]
fn test_escape_and_cursor_without_anchor_produce_no_commands() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    send(&mut controller, &mut state, AppIntent::ToolSelected { kind: ShapeKind::Line });
    let logged = state.command_log.len();

    send(&mut controller, &mut state, AppIntent::CursorMoved { pos: DVec2::new(1.0, 1.0) });
    send(&mut controller, &mut state, AppIntent::EscapePressed);
    assert_eq!(state.command_log.len(), logged);

    send(&mut controller, &mut state, AppIntent::MapClicked { pos: DVec2::new(1.0, 1.0) });
    send(&mut controller, &mut state, AppIntent::EscapePressed);
    assert!(matches!(
        state.command_log.entries().last(),
        Some(AppCommand::ShapeToolCancel)
    ));
    assert!(state.editor.active_tool().and_then(|t| t.anchor()).is_none());
}

#[test]
fn test_units_apply_to_all_tools() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    send(&mut controller, &mut state, AppIntent::ToolSelected { kind: ShapeKind::Ellipse });
    send(&mut controller, &mut state, AppIntent::MapClicked { pos: DVec2::new(0.0, 0.0) });
    send(
        &mut controller,
        &mut state,
        AppIntent::FieldValueEntered {
            field: ShapeField::MajorAxis,
            value: 1000.0,
        },
    );
    send(&mut controller, &mut state, AppIntent::LinearUnitSelected { unit: LinearUnit::Kilometers });
    send(&mut controller, &mut state, AppIntent::AzimuthUnitSelected { unit: AzimuthUnit::Mils });

    assert_eq!(state.options.linear_unit, LinearUnit::Kilometers);
    assert_eq!(state.options.azimuth_unit, AzimuthUnit::Mils);
    let tool = state.editor.active_tool().expect("aktives Tool erwartet");
    assert_eq!(tool.field_text(ShapeField::MajorAxis), Some("1"));

    // Wechsel auf ein anderes Tool übernimmt dieselben Einheiten
    send(&mut controller, &mut state, AppIntent::ToolSelected { kind: ShapeKind::Line });
    let tool = state.editor.active_tool().expect("aktives Tool erwartet");
    assert_eq!(tool.settings().linear_unit, LinearUnit::Kilometers);
}

#[test]
fn test_exit_requested_sets_exit_flag_and_logs_command() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    assert!(!state.should_exit);

    send(&mut controller, &mut state, AppIntent::ExitRequested);

    assert!(state.should_exit);
    match state.command_log.entries().last() {
        Some(AppCommand::RequestExit) => {}
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
}
