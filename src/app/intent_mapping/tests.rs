use crate::app::tools::{ShapeField, ShapeKind};
use crate::app::{AppCommand, AppIntent, AppState};
use crate::core::LinearUnit;
use glam::DVec2;

use super::map_intent_to_commands;

fn state_with_active(kind: ShapeKind) -> AppState {
    let mut state = AppState::new();
    let index = state
        .editor
        .tool_manager
        .index_of(kind)
        .expect("Tool registriert");
    state.editor.tool_manager.set_active(index);
    state
}

#[test]
fn tool_selected_maps_to_select_command() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ToolSelected {
            kind: ShapeKind::Ellipse,
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(
        commands[0],
        AppCommand::SelectShapeTool {
            kind: ShapeKind::Ellipse
        }
    ));
}

#[test]
fn cursor_move_without_anchor_maps_to_nothing() {
    let state = state_with_active(ShapeKind::Ellipse);

    let commands = map_intent_to_commands(&state, AppIntent::CursorMoved { pos: DVec2::ONE });

    assert!(commands.is_empty());
}

#[test]
fn escape_without_pending_input_maps_to_nothing() {
    let state = state_with_active(ShapeKind::Line);

    assert!(map_intent_to_commands(&state, AppIntent::EscapePressed).is_empty());
    assert!(map_intent_to_commands(&AppState::new(), AppIntent::EscapePressed).is_empty());
}

#[test]
fn field_text_is_passed_through_unchanged() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::FieldTextEdited {
            field: ShapeField::MajorAxis,
            text: " 12,5".to_string(),
        },
    );

    assert_eq!(commands.len(), 1);
    match &commands[0] {
        AppCommand::SetFieldText { field, text } => {
            assert_eq!(*field, ShapeField::MajorAxis);
            assert_eq!(text, " 12,5");
        }
        other => panic!("unerwarteter Command: {:?}", other),
    }
}

#[test]
fn unit_selection_maps_to_unit_command() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::LinearUnitSelected {
            unit: LinearUnit::NauticalMiles,
        },
    );

    assert!(matches!(
        commands[0],
        AppCommand::SetLinearUnit {
            unit: LinearUnit::NauticalMiles
        }
    ));
}
