use crate::app::tools::{ShapeField, ShapeKind};
use crate::core::{AzimuthUnit, CoordinateFormat, LinearUnit};
use crate::shared::{EllipseMode, ToolOptions};
use glam::DVec2;
use std::path::PathBuf;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Form-Tool aktivieren
    SelectShapeTool { kind: ShapeKind },
    /// Klick an das aktive Tool weiterreichen
    ShapeToolClick { pos: DVec2 },
    /// Cursor-Position für die Live-Vorschau
    ShapeToolMouseMove { pos: DVec2 },
    /// Aktives Tool abschließen (Enter)
    ShapeToolEnter,
    /// Aktives Tool zurücksetzen (Escape)
    ShapeToolCancel,
    /// Feld-Text übernehmen
    SetFieldText { field: ShapeField, text: String },
    /// Feld-Zahlenwert setzen
    SetFieldValue { field: ShapeField, value: f64 },
    /// Distanz-Einheit für alle Tools setzen
    SetLinearUnit { unit: LinearUnit },
    /// Azimut-Einheit für alle Tools setzen
    SetAzimuthUnit { unit: AzimuthUnit },
    /// Achsen-Anzeigemodus setzen
    SetEllipseMode { mode: EllipseMode },
    /// Koordinaten-Format setzen
    SetCoordinateFormat { format: CoordinateFormat },
    /// Optionen übernehmen und an alle Tools verteilen
    ApplyOptions { options: Box<ToolOptions> },
    /// Optionen als TOML speichern
    SaveOptions { path: Option<PathBuf> },
    /// Beenden anfordern
    RequestExit,
}
