//! Handler für Form-Tool-Operationen (Linie, Ellipse, Entfernungsringe).

use crate::app::tools::{ShapeField, ShapeKind, ShapeTool, ToolAction, ToolContext, ToolResult};
use crate::app::AppState;
use crate::core::GeodeticEngine;
use glam::DVec2;

/// Führt `f` mit dem aktiven Tool und einem Kontext aus Engine + Arbeitsbereich aus.
fn with_active_tool<R>(
    state: &mut AppState,
    engine: &dyn GeodeticEngine,
    f: impl FnOnce(&mut dyn ShapeTool, &ToolContext<'_>) -> R,
) -> anyhow::Result<R> {
    let area = state.options.area_of_interest;
    let ctx = ToolContext {
        engine,
        area: &area,
    };
    let Some(tool) = state.editor.tool_manager.active_tool_mut() else {
        anyhow::bail!("Kein Form-Tool aktiv");
    };
    Ok(f(tool, &ctx))
}

/// Aktiviert ein Form-Tool; das bisherige Tool wird zurückgesetzt.
pub fn select(state: &mut AppState, kind: ShapeKind) -> anyhow::Result<()> {
    let index = state
        .editor
        .tool_manager
        .index_of(kind)
        .ok_or_else(|| anyhow::anyhow!("Form-Tool {:?} nicht registriert", kind))?;
    state.editor.tool_manager.set_active(index);
    if let Some(tool) = state.editor.active_tool() {
        log::info!("Form-Tool aktiviert: {}", tool.name());
    }
    Ok(())
}

/// Verarbeitet einen Kartenklick; schließt ab, sobald das Tool bereit ist.
pub fn click(
    state: &mut AppState,
    engine: &dyn GeodeticEngine,
    pos: DVec2,
) -> anyhow::Result<Option<ToolResult>> {
    let action = with_active_tool(state, engine, |tool, ctx| tool.on_click(pos, ctx))??;
    if action == ToolAction::ReadyToExecute {
        finalize(state, engine)
    } else {
        Ok(None)
    }
}

/// Live-Vorschau zur Cursor-Position. Ohne aktives Tool: `Ignored`.
pub fn mouse_move(state: &mut AppState, engine: &dyn GeodeticEngine, pos: DVec2) -> ToolAction {
    with_active_tool(state, engine, |tool, ctx| tool.on_mouse_move(pos, ctx))
        .unwrap_or(ToolAction::Ignored)
}

/// Enter: schließt das aktive Tool ab, falls alle Pflichtwerte vorliegen.
pub fn enter(
    state: &mut AppState,
    engine: &dyn GeodeticEngine,
) -> anyhow::Result<Option<ToolResult>> {
    let action = with_active_tool(state, engine, |tool, ctx| tool.on_enter(ctx))??;
    if action == ToolAction::ReadyToExecute {
        finalize(state, engine)
    } else {
        Ok(None)
    }
}

/// Bricht die laufende Konstruktion ab (Escape).
pub fn cancel(state: &mut AppState) {
    if let Some(tool) = state.editor.tool_manager.active_tool_mut() {
        tool.reset();
        log::debug!("{}: Konstruktion abgebrochen", tool.name());
    }
}

/// Übernimmt User-Text in ein Eingabefeld des aktiven Tools.
pub fn set_field_text(
    state: &mut AppState,
    engine: &dyn GeodeticEngine,
    field: ShapeField,
    text: &str,
) -> anyhow::Result<()> {
    with_active_tool(state, engine, |tool, ctx| tool.set_field_text(field, text, ctx))??;
    Ok(())
}

/// Setzt einen Zahlenwert (Anzeige-Einheit) im aktiven Tool.
pub fn set_field_value(
    state: &mut AppState,
    engine: &dyn GeodeticEngine,
    field: ShapeField,
    value: f64,
) -> anyhow::Result<()> {
    with_active_tool(state, engine, |tool, ctx| {
        tool.set_field_value(field, value, ctx)
    })??;
    Ok(())
}

/// Gemeinsame Logik: Tool ausführen, Ergebnis ablegen, Tool zurücksetzen.
///
/// Scheitert die Ausführung, bleibt das Tool abschlussbereit.
fn finalize(
    state: &mut AppState,
    engine: &dyn GeodeticEngine,
) -> anyhow::Result<Option<ToolResult>> {
    let result = match with_active_tool(state, engine, |tool, ctx| tool.execute(ctx))? {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Form konnte nicht abgeschlossen werden: {}", e);
            return Err(e.into());
        }
    };

    log::info!(
        "Form abgeschlossen: {:?} ({} Geometrien)",
        result.kind,
        result.geometries.len()
    );
    state.finished_shapes.push(result.clone());
    if let Some(tool) = state.editor.tool_manager.active_tool_mut() {
        tool.reset();
    }
    Ok(Some(result))
}
