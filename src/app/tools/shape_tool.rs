//! ShapeTool-Trait: Schnittstelle für alle Form-Tools.

use super::common::ToolSettings;
use super::{ShapeField, ShapeKind, ToolAction, ToolContext, ToolPreview, ToolResult};
use crate::core::{AzimuthUnit, LinearUnit};
use crate::shared::{EllipseMode, ShapeError, ToolOptions};
use glam::DVec2;

/// Schnittstelle für alle Form-Tools (Linie, Ellipse, Entfernungsringe).
///
/// Tools sind zustandsbehaftet (Klick-Phasen), halten ihre Vorschau-Geometrie
/// und erzeugen beim Abschluss ein `ToolResult` als reine Daten.
/// Jede mutierende Operation läuft synchron inklusive aller Engine-Aufrufe.
pub trait ShapeTool {
    /// Anzeigename
    fn name(&self) -> &str;

    /// Art der erzeugten Form
    fn kind(&self) -> ShapeKind;

    /// Kurzbeschreibung
    fn description(&self) -> &str;

    /// Statustext für den Host (z.B. "Mittelpunkt klicken")
    fn status_text(&self) -> &str;

    /// Gemeinsame Einstellungen (Einheiten, Limit, Verdichtung)
    fn settings(&self) -> &ToolSettings;

    /// Aktuelle Vorschau-Geometrie
    fn preview(&self) -> &ToolPreview;

    /// Kartenklick verarbeiten. Gibt die nächste Aktion zurück.
    fn on_click(&mut self, pos: DVec2, ctx: &ToolContext<'_>) -> Result<ToolAction, ShapeError>;

    /// Mausbewegung: aktualisiert die Live-Vorschau, ohne einen Punkt zu setzen.
    ///
    /// Fehlschläge der Engine werden lokal geschluckt (Vorschau bleibt stehen).
    fn on_mouse_move(&mut self, pos: DVec2, ctx: &ToolContext<'_>) -> ToolAction;

    /// Enter: Form abschließen, falls alle Pflichtwerte vorliegen.
    fn on_enter(&mut self, ctx: &ToolContext<'_>) -> Result<ToolAction, ShapeError>;

    /// Ergebnis erzeugen (Geometrie + Attribute als reine Daten).
    fn execute(&self, ctx: &ToolContext<'_>) -> Result<ToolResult, ShapeError>;

    /// Tool-Zustand zurücksetzen (Escape / Tool-Wechsel / nach Abschluss).
    ///
    /// Einheiten- und Modus-Einstellungen bleiben erhalten.
    fn reset(&mut self);

    /// Ist das Tool bereit zur Ausführung?
    fn is_ready(&self) -> bool;

    /// Hat das Tool angefangene Eingaben?
    fn has_pending_input(&self) -> bool {
        false
    }

    /// Ankerpunkt (Start / Mittelpunkt), falls gesetzt
    fn anchor(&self) -> Option<DVec2>;

    /// Vom Tool angebotene Eingabefelder
    fn fields(&self) -> &'static [ShapeField];

    /// Zahlenwert eines Felds in Anzeige-Einheit setzen.
    fn set_field_value(
        &mut self,
        field: ShapeField,
        value: f64,
        ctx: &ToolContext<'_>,
    ) -> Result<(), ShapeError>;

    /// User-Text eines Felds übernehmen (parsen, dann Zahlen-Setter).
    fn set_field_text(
        &mut self,
        field: ShapeField,
        text: &str,
        ctx: &ToolContext<'_>,
    ) -> Result<(), ShapeError>;

    /// Aktueller Text eines Felds
    fn field_text(&self, field: ShapeField) -> Option<&str>;

    /// Anzeige-Einheit für Distanzen wechseln.
    fn set_linear_unit(&mut self, unit: LinearUnit);

    /// Anzeige-Einheit für Azimute wechseln.
    fn set_azimuth_unit(&mut self, unit: AzimuthUnit);

    /// Anzeige-Modus der Achsen wechseln (nur Ellipsen).
    fn set_ellipse_mode(&mut self, _mode: EllipseMode) {}

    /// Optionen übernehmen (Einheiten, Limit, Verdichtung).
    ///
    /// Ändert sich das Limit, werden zurückgehaltene Rohwerte neu geprüft.
    fn apply_options(
        &mut self,
        opts: &ToolOptions,
        ctx: &ToolContext<'_>,
    ) -> Result<(), ShapeError>;
}
