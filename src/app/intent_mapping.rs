//! Mapping von Host-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let tool = state.editor.active_tool();
    match intent {
        AppIntent::ToolSelected { kind } => vec![AppCommand::SelectShapeTool { kind }],
        AppIntent::MapClicked { pos } => vec![AppCommand::ShapeToolClick { pos }],
        // Ohne Ankerpunkt gibt es nichts zu zeigen
        AppIntent::CursorMoved { pos } => match tool {
            Some(t) if t.anchor().is_some() => vec![AppCommand::ShapeToolMouseMove { pos }],
            _ => vec![],
        },
        AppIntent::EnterPressed => vec![AppCommand::ShapeToolEnter],
        AppIntent::EscapePressed => match tool {
            Some(t) if t.has_pending_input() => vec![AppCommand::ShapeToolCancel],
            _ => vec![],
        },
        AppIntent::FieldTextEdited { field, text } => {
            vec![AppCommand::SetFieldText { field, text }]
        }
        AppIntent::FieldValueEntered { field, value } => {
            vec![AppCommand::SetFieldValue { field, value }]
        }
        AppIntent::LinearUnitSelected { unit } => vec![AppCommand::SetLinearUnit { unit }],
        AppIntent::AzimuthUnitSelected { unit } => vec![AppCommand::SetAzimuthUnit { unit }],
        AppIntent::EllipseModeSelected { mode } => vec![AppCommand::SetEllipseMode { mode }],
        AppIntent::CoordinateFormatSelected { format } => {
            vec![AppCommand::SetCoordinateFormat { format }]
        }
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::SaveOptionsRequested { path } => vec![AppCommand::SaveOptions { path }],
        AppIntent::ExitRequested => vec![AppCommand::RequestExit],
    }
}

#[cfg(test)]
mod tests;
