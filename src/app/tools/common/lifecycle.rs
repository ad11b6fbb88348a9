//! Gemeinsame Einstellungen aller Form-Tools.

use crate::core::{AzimuthUnit, CoordinateFormat, DensifyPolicy, LinearUnit};
use crate::shared::{EllipseMode, ToolOptions};

/// Einheiten, Limit und Verdichtung, die jedes Tool aus `ToolOptions` übernimmt.
///
/// Einheiten-Wechsel ändern nur die Anzeige; gespeicherte Werte behalten
/// ihre eigene Einheit.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    /// Anzeige-Einheit für Distanzen
    pub linear_unit: LinearUnit,
    /// Anzeige-Einheit für Azimute
    pub azimuth_unit: AzimuthUnit,
    /// Anzeige-Modus der Ellipsen-Achsen
    pub ellipse_mode: EllipseMode,
    /// Koordinaten-Format für Statusausgaben
    pub coordinate_format: CoordinateFormat,
    /// Distanz-Limit in Metern
    pub limit_m: f64,
    /// Verdichtung für Vorschau-Umrisse
    pub preview_densify: DensifyPolicy,
    /// Verdichtung für endgültige Umrisse
    pub final_densify: DensifyPolicy,
    /// Verdichtung für geodätische Linien
    pub line_densify: DensifyPolicy,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_options(&ToolOptions::default())
    }
}

impl ToolSettings {
    /// Übernimmt alle Werte aus den Optionen.
    pub fn from_options(opts: &ToolOptions) -> Self {
        Self {
            linear_unit: opts.linear_unit,
            azimuth_unit: opts.azimuth_unit,
            ellipse_mode: opts.ellipse_mode,
            coordinate_format: opts.coordinate_format,
            limit_m: opts.major_axis_limit_m,
            preview_densify: opts.preview_densify(),
            final_densify: opts.final_densify(),
            line_densify: opts.line_densify(),
        }
    }

    /// Übernimmt Limit und Verdichtung (Einheiten setzt das Tool selbst, da
    /// sich dabei die Feld-Texte ändern). Gibt `true` zurück, wenn sich das
    /// Limit geändert hat.
    pub fn apply_limits(&mut self, opts: &ToolOptions) -> bool {
        let limit_changed = self.limit_m != opts.major_axis_limit_m;
        self.limit_m = opts.major_axis_limit_m;
        self.coordinate_format = opts.coordinate_format;
        self.preview_densify = opts.preview_densify();
        self.final_densify = opts.final_densify();
        self.line_densify = opts.line_densify();
        limit_changed
    }
}

/// Macro für die identischen Delegationsmethoden aller Form-Tools.
///
/// Erwartet, dass der Typ `self.settings` (ToolSettings) und
/// `self.preview` (ToolPreview) hat.
///
/// Wird innerhalb eines `impl ShapeTool for X { ... }`-Blocks aufgerufen.
#[macro_export]
macro_rules! impl_settings_delegation {
    () => {
        fn settings(&self) -> &$crate::app::tools::common::ToolSettings {
            &self.settings
        }

        fn preview(&self) -> &$crate::app::tools::ToolPreview {
            &self.preview
        }
    };
}
