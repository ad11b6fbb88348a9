use crate::app::tools::{ShapeField, ShapeKind};
use crate::core::{AzimuthUnit, CoordinateFormat, LinearUnit};
use crate::shared::{EllipseMode, ToolOptions};
use glam::DVec2;
use std::path::PathBuf;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben des Hosts ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Form-Tool auswählen
    ToolSelected { kind: ShapeKind },
    /// Kartenklick (lon, lat in Grad)
    MapClicked { pos: DVec2 },
    /// Cursor über der Karte bewegt
    CursorMoved { pos: DVec2 },
    /// Enter gedrückt: Form abschließen
    EnterPressed,
    /// Escape gedrückt: Konstruktion abbrechen
    EscapePressed,
    /// User-Text in einem Eingabefeld geändert
    FieldTextEdited { field: ShapeField, text: String },
    /// Zahlenwert für ein Eingabefeld übergeben (Anzeige-Einheit)
    FieldValueEntered { field: ShapeField, value: f64 },
    /// Distanz-Einheit gewählt
    LinearUnitSelected { unit: LinearUnit },
    /// Azimut-Einheit gewählt
    AzimuthUnitSelected { unit: AzimuthUnit },
    /// Halb-/Vollachsen-Anzeige gewählt
    EllipseModeSelected { mode: EllipseMode },
    /// Koordinaten-Format gewählt
    CoordinateFormatSelected { format: CoordinateFormat },
    /// Optionen übernehmen
    OptionsChanged { options: Box<ToolOptions> },
    /// Optionen speichern (ohne Pfad: Standard-Pfad neben der Binary)
    SaveOptionsRequested { path: Option<PathBuf> },
    /// Anwendung beenden
    ExitRequested,
}
