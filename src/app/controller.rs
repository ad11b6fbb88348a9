//! Application Controller für zentrale Event-Verarbeitung.

use super::tools::ToolResult;
use super::{AppCommand, AppIntent, AppState};
use crate::core::{EllipsoidalEngine, GeodeticEngine};

/// Callback, der jede abgeschlossene Form erhält.
pub type FinalizeCallback = Box<dyn FnMut(&ToolResult)>;

/// Orchestriert Host-Events und Handler auf den AppState.
pub struct AppController {
    engine: Box<dyn GeodeticEngine>,
    on_finalize: Option<FinalizeCallback>,
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}

impl AppController {
    /// Erstellt einen Controller mit der WGS84-Engine.
    pub fn new() -> Self {
        Self::with_engine(Box::new(EllipsoidalEngine::wgs84()))
    }

    /// Erstellt einen Controller mit einer eigenen geodätischen Engine.
    pub fn with_engine(engine: Box<dyn GeodeticEngine>) -> Self {
        Self {
            engine,
            on_finalize: None,
        }
    }

    /// Registriert den Callback für abgeschlossene Formen.
    pub fn set_finalize_callback(&mut self, callback: impl FnMut(&ToolResult) + 'static) {
        self.on_finalize = Some(Box::new(callback));
    }

    /// Geodätische Engine des Controllers
    pub fn engine(&self) -> &dyn GeodeticEngine {
        self.engine.as_ref()
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;
        let engine = self.engine.as_ref();

        let finished = match command {
            // === Form-Tools ===
            AppCommand::SelectShapeTool { kind } => {
                handlers::shape_tool::select(state, kind)?;
                None
            }
            AppCommand::ShapeToolClick { pos } => handlers::shape_tool::click(state, engine, pos)?,
            AppCommand::ShapeToolMouseMove { pos } => {
                handlers::shape_tool::mouse_move(state, engine, pos);
                None
            }
            AppCommand::ShapeToolEnter => handlers::shape_tool::enter(state, engine)?,
            AppCommand::ShapeToolCancel => {
                handlers::shape_tool::cancel(state);
                None
            }
            AppCommand::SetFieldText { field, text } => {
                handlers::shape_tool::set_field_text(state, engine, field, &text)?;
                None
            }
            AppCommand::SetFieldValue { field, value } => {
                handlers::shape_tool::set_field_value(state, engine, field, value)?;
                None
            }

            // === Einheiten & Optionen ===
            AppCommand::SetLinearUnit { unit } => {
                handlers::options::set_linear_unit(state, unit);
                None
            }
            AppCommand::SetAzimuthUnit { unit } => {
                handlers::options::set_azimuth_unit(state, unit);
                None
            }
            AppCommand::SetEllipseMode { mode } => {
                handlers::options::set_ellipse_mode(state, mode);
                None
            }
            AppCommand::SetCoordinateFormat { format } => {
                handlers::options::set_coordinate_format(state, engine, format);
                None
            }
            AppCommand::ApplyOptions { options } => {
                handlers::options::apply_options(state, engine, *options);
                None
            }
            AppCommand::SaveOptions { path } => {
                handlers::options::save_options(state, path)?;
                None
            }

            // === Anwendungssteuerung ===
            AppCommand::RequestExit => {
                state.should_exit = true;
                None
            }
        };

        if let (Some(result), Some(callback)) = (finished, self.on_finalize.as_mut()) {
            callback(&result);
        }

        Ok(())
    }
}
