use dd_shape_builder::{
    AppController, AppIntent, AppState, AzimuthUnit, CoordinateFormat, EllipseMode, LinearUnit,
    ShapeError, ShapeField, ShapeKind, ToolOptions,
};
use glam::DVec2;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{}_{}.toml", name, std::process::id()))
}

#[test]
fn test_save_options_writes_loadable_toml() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let path = temp_path("dd_shape_builder_save_test");

    for intent in [
        AppIntent::LinearUnitSelected { unit: LinearUnit::NauticalMiles },
        AppIntent::AzimuthUnitSelected { unit: AzimuthUnit::Gradians },
        AppIntent::EllipseModeSelected { mode: EllipseMode::Full },
        AppIntent::CoordinateFormatSelected { format: CoordinateFormat::Ddm },
        AppIntent::SaveOptionsRequested { path: Some(path.clone()) },
    ] {
        controller
            .handle_intent(&mut state, intent)
            .expect("Intent sollte ohne Fehler durchlaufen");
    }

    let loaded = ToolOptions::load_from_file(&path);
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, state.options);
    assert_eq!(loaded.linear_unit, LinearUnit::NauticalMiles);
    assert_eq!(loaded.ellipse_mode, EllipseMode::Full);
    assert_eq!(loaded.coordinate_format, CoordinateFormat::Ddm);
}

#[test]
fn test_save_to_unwritable_path_fails() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let result = controller.handle_intent(
        &mut state,
        AppIntent::SaveOptionsRequested {
            path: Some("/nonexistent/dir/dd_shape_builder.toml".into()),
        },
    );
    assert!(result.is_err());
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let path = temp_path("dd_shape_builder_malformed_test");
    std::fs::write(&path, "linear_unit = 42\n[[[").expect("Testdatei schreibbar");
    let loaded = ToolOptions::load_from_file(&path);
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, ToolOptions::default());
}

#[test]
fn test_loaded_options_reach_tools() {
    let options = ToolOptions {
        linear_unit: LinearUnit::Miles,
        major_axis_limit_m: 5_000.0,
        ..ToolOptions::default()
    };
    let mut controller = AppController::new();
    let mut state = AppState::with_options(options);
    controller
        .handle_intent(&mut state, AppIntent::ToolSelected { kind: ShapeKind::Line })
        .expect("Tool-Auswahl");

    let tool = state.editor.active_tool().expect("aktives Tool erwartet");
    assert_eq!(tool.settings().linear_unit, LinearUnit::Miles);
    assert_eq!(tool.settings().limit_m, 5_000.0);

    // 4 Meilen > 5 km
    let err = controller
        .handle_intent(
            &mut state,
            AppIntent::FieldValueEntered {
                field: ShapeField::Distance,
                value: 4.0,
            },
        )
        .expect_err("Limit erwartet");
    assert!(matches!(
        err.downcast_ref::<ShapeError>(),
        Some(ShapeError::LimitExceeded { .. })
    ));
}

#[test]
fn test_raised_limit_accepts_pending_axis() {
    let options = ToolOptions {
        major_axis_limit_m: 1_000_000.0,
        ..ToolOptions::default()
    };
    let mut controller = AppController::new();
    let mut state = AppState::with_options(options);
    controller
        .handle_intent(&mut state, AppIntent::ToolSelected { kind: ShapeKind::Ellipse })
        .expect("Tool-Auswahl");
    controller
        .handle_intent(&mut state, AppIntent::MapClicked { pos: DVec2::new(0.0, 0.0) })
        .expect("Mittelpunkt");
    assert!(controller
        .handle_intent(
            &mut state,
            AppIntent::FieldValueEntered {
                field: ShapeField::MajorAxis,
                value: 1_500_000.0,
            },
        )
        .is_err());
    let tool = state.editor.active_tool().expect("aktives Tool erwartet");
    assert!(tool.preview().outlines.is_empty());

    let raised = ToolOptions {
        major_axis_limit_m: 2_000_000.0,
        ..state.options.clone()
    };
    controller
        .handle_intent(&mut state, AppIntent::OptionsChanged { options: Box::new(raised) })
        .expect("Optionen übernehmen");

    assert_eq!(state.options.major_axis_limit_m, 2_000_000.0);
    let tool = state.editor.active_tool().expect("aktives Tool erwartet");
    assert_eq!(tool.field_text(ShapeField::MajorAxis), Some("1500000"));
    assert_eq!(tool.preview().outlines.len(), 1);
}

#[test]
fn test_lowered_limit_blocks_enter_on_accepted_axis() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    controller
        .handle_intent(&mut state, AppIntent::ToolSelected { kind: ShapeKind::Ellipse })
        .expect("Tool-Auswahl");
    controller
        .handle_intent(&mut state, AppIntent::MapClicked { pos: DVec2::new(8.0, 47.0) })
        .expect("Mittelpunkt");
    for (field, value) in [(ShapeField::MajorAxis, 5_000.0), (ShapeField::MinorAxis, 2_000.0)] {
        controller
            .handle_intent(&mut state, AppIntent::FieldValueEntered { field, value })
            .expect("Achse übernommen");
    }

    let lowered = ToolOptions {
        major_axis_limit_m: 1_000.0,
        ..state.options.clone()
    };
    controller
        .handle_intent(&mut state, AppIntent::OptionsChanged { options: Box::new(lowered) })
        .expect("Optionen übernehmen");

    let err = controller
        .handle_intent(&mut state, AppIntent::EnterPressed)
        .expect_err("Achse über dem Limit darf nicht abschließen");
    assert!(matches!(
        err.downcast_ref::<ShapeError>(),
        Some(ShapeError::IncompleteShape(_))
    ));
    assert!(state.finished_shapes.is_empty());
}

#[test]
fn test_status_line_uses_coordinate_format() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    assert_eq!(state.status_line(), "Kein Form-Tool aktiv");

    controller
        .handle_intent(&mut state, AppIntent::ToolSelected { kind: ShapeKind::RangeRings })
        .expect("Tool-Auswahl");
    controller
        .handle_intent(&mut state, AppIntent::MapClicked { pos: DVec2::new(-13.4, 52.5) })
        .expect("Mittelpunkt");
    assert!(state.status_line().ends_with("Anker: 52.500000 N 13.400000 W"));

    controller
        .handle_intent(
            &mut state,
            AppIntent::CoordinateFormatSelected { format: CoordinateFormat::Dms },
        )
        .expect("Format");
    assert!(state.status_line().ends_with("Anker: 52° 30' 00.00\" N 13° 24' 00.00\" W"));
}
