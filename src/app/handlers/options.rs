//! Handler für Einheiten, Anzeige-Modus und persistierte Optionen.

use crate::app::tools::{ShapeTool, ToolContext};
use crate::app::AppState;
use crate::core::{AzimuthUnit, CoordinateFormat, GeodeticEngine, LinearUnit};
use crate::shared::{EllipseMode, ToolOptions};
use std::path::PathBuf;

/// Setzt die Distanz-Einheit in Optionen und allen Tools (nur Anzeige).
pub fn set_linear_unit(state: &mut AppState, unit: LinearUnit) {
    state.options.linear_unit = unit;
    for tool in state.editor.tool_manager.tools_mut() {
        tool.set_linear_unit(unit);
    }
    log::info!("Distanz-Einheit: {}", unit);
}

/// Setzt die Azimut-Einheit in Optionen und allen Tools (nur Anzeige).
pub fn set_azimuth_unit(state: &mut AppState, unit: AzimuthUnit) {
    state.options.azimuth_unit = unit;
    for tool in state.editor.tool_manager.tools_mut() {
        tool.set_azimuth_unit(unit);
    }
    log::info!("Azimut-Einheit: {}", unit.label());
}

/// Wechselt zwischen Halb- und Vollachsen-Anzeige.
pub fn set_ellipse_mode(state: &mut AppState, mode: EllipseMode) {
    state.options.ellipse_mode = mode;
    for tool in state.editor.tool_manager.tools_mut() {
        tool.set_ellipse_mode(mode);
    }
    log::info!("Achsen-Modus: {:?}", mode);
}

/// Setzt das Koordinaten-Format für Statusausgaben.
pub fn set_coordinate_format(
    state: &mut AppState,
    engine: &dyn GeodeticEngine,
    format: CoordinateFormat,
) {
    state.options.coordinate_format = format;
    apply_to_tools(state, engine);
}

/// Übernimmt neue Optionen und verteilt sie an alle Tools.
///
/// Bei geändertem Limit prüfen die Tools Roh- und gültige Werte neu; Werte
/// über dem Limit blockieren den Abschluss, bis sie korrigiert werden.
pub fn apply_options(state: &mut AppState, engine: &dyn GeodeticEngine, options: ToolOptions) {
    state.options = options;
    apply_to_tools(state, engine);
    log::info!("Optionen übernommen");
}

/// Speichert die Optionen als TOML (Standard: neben der Binary).
pub fn save_options(state: &AppState, path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(ToolOptions::config_path);
    state.options.save_to_file(&path)
}

fn apply_to_tools(state: &mut AppState, engine: &dyn GeodeticEngine) {
    let area = state.options.area_of_interest;
    let ctx = ToolContext {
        engine,
        area: &area,
    };
    let options = &state.options;
    for tool in state.editor.tool_manager.tools_mut() {
        if let Err(e) = tool.apply_options(options, &ctx) {
            log::warn!("{}: Wert verletzt das Limit: {}", tool.name(), e);
        }
    }
}
