use crate::app::tools::common::ToolSettings;
use crate::app::tools::{ShapeTool, ToolResult};
use crate::app::CommandLog;
use crate::shared::ToolOptions;

use super::EditorToolState;

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Form-Tool-State
    pub editor: EditorToolState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen (Einheiten, Limit, Verdichtung, Arbeitsbereich)
    pub options: ToolOptions,
    /// Alle in dieser Sitzung abgeschlossenen Formen
    pub finished_shapes: Vec<ToolResult>,
    /// Signalisiert dem Host, die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt einen neuen App-State mit Standard-Optionen
    pub fn new() -> Self {
        Self::with_options(ToolOptions::default())
    }

    /// Erstellt einen App-State mit geladenen Optionen.
    ///
    /// Alle Tools starten mit Einheiten, Limit und Verdichtung aus `options`.
    pub fn with_options(options: ToolOptions) -> Self {
        let editor = EditorToolState::with_settings(ToolSettings::from_options(&options));
        Self {
            editor,
            command_log: CommandLog::new(),
            options,
            finished_shapes: Vec::new(),
            should_exit: false,
        }
    }

    /// Statuszeile: aktives Tool, Hinweis und formatierter Ankerpunkt.
    pub fn status_line(&self) -> String {
        let Some(tool) = self.editor.active_tool() else {
            return "Kein Form-Tool aktiv".to_string();
        };
        let mut line = format!("{}: {}", tool.name(), tool.status_text());
        if let Some(anchor) = tool.anchor() {
            line.push_str(" | Anker: ");
            line.push_str(&self.options.coordinate_format.format(anchor));
        }
        line
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
