//! Application-Layer: Controller, State, Events und Form-Tools.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Tools, Optionen, Ergebnisse).
pub mod state;
pub mod tools;

pub use command_log::CommandLog;
pub use controller::{AppController, FinalizeCallback};
pub use events::{AppCommand, AppIntent};
pub use state::{AppState, EditorToolState};
pub use tools::{ShapeField, ShapeKind, ShapeTool, ToolAction, ToolResult};
