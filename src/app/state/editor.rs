use crate::app::tools::common::ToolSettings;
use crate::app::tools::{ShapeTool, ToolManager};

/// Zustand der Form-Tools
pub struct EditorToolState {
    /// Form-Tool-Manager (Linie, Ellipse, Entfernungsringe)
    pub tool_manager: ToolManager,
}

impl Default for EditorToolState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorToolState {
    /// Erstellt den Standard-Werkzeugzustand (kein Tool aktiv).
    pub fn new() -> Self {
        Self {
            tool_manager: ToolManager::new(),
        }
    }

    /// Werkzeugzustand, dessen Tools mit `settings` starten.
    pub fn with_settings(settings: ToolSettings) -> Self {
        Self {
            tool_manager: ToolManager::with_settings(settings),
        }
    }

    /// Aktives Form-Tool, falls vorhanden.
    pub fn active_tool(&self) -> Option<&dyn ShapeTool> {
        self.tool_manager.active_tool()
    }
}
