//! Zentrale Konfiguration für den Shape-Builder.
//!
//! `ToolOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{AzimuthUnit, CoordinateFormat, DensifyPolicy, GeoBounds, LinearUnit};
use serde::{Deserialize, Serialize};

// ── Validierung ─────────────────────────────────────────────────────

/// Maximale Achsen-/Distanzlänge in Metern.
pub const MAJOR_AXIS_LIMIT_M: f64 = 20_000_000.0;

// ── Verdichtung ─────────────────────────────────────────────────────

/// Ellipsen-Vorschau: ein Stützpunkt je N Grad.
pub const DEFAULT_PREVIEW_DENSIFY_DEG: f64 = 5.0;
/// Endgültige Ellipse: ein Stützpunkt je N Grad.
pub const DEFAULT_FINAL_DENSIFY_DEG: f64 = 1.0;
/// Geodätische Linien: maximaler Stützpunkt-Abstand in Metern.
pub const DEFAULT_LINE_DENSIFY_M: f64 = 10_000.0;

/// Datei-Name der Optionen-Datei neben der Binary.
const CONFIG_FILE_NAME: &str = "dd_shape_builder.toml";

/// Anzeige-Modus der Ellipsen-Achsen.
///
/// `Semi`: angezeigte Werte sind Halbachsen. `Full`: angezeigte Werte sind
/// volle Achsen (doppelte Halbachse). Gespeichert wird immer die Halbachse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EllipseMode {
    /// Halbachsen
    #[default]
    Semi,
    /// Volle Achsen
    Full,
}

impl EllipseMode {
    /// Faktor zwischen Anzeige-Wert und gespeicherter Halbachse.
    pub fn display_factor(self) -> f64 {
        match self {
            EllipseMode::Semi => 1.0,
            EllipseMode::Full => 2.0,
        }
    }
}

impl std::str::FromStr for EllipseMode {
    type Err = crate::shared::ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "semi" => Ok(Self::Semi),
            "full" => Ok(Self::Full),
            _ => Err(crate::shared::ShapeError::InvalidInput(s.to_string())),
        }
    }
}

/// Laufzeit-Optionen aller Form-Tools (persistiert als TOML).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOptions {
    // ── Einheiten ────────────────────────────────────────────────
    /// Lineare Einheit für Achsen und Distanzen
    #[serde(default)]
    pub linear_unit: LinearUnit,
    /// Winkel-Einheit für Azimute
    #[serde(default)]
    pub azimuth_unit: AzimuthUnit,
    /// Anzeige-Modus der Ellipsen-Achsen
    #[serde(default)]
    pub ellipse_mode: EllipseMode,
    /// Anzeige-Format für Koordinaten
    #[serde(default)]
    pub coordinate_format: CoordinateFormat,

    // ── Validierung ──────────────────────────────────────────────
    /// Maximale Distanz in Metern
    #[serde(default = "default_major_axis_limit_m")]
    pub major_axis_limit_m: f64,
    /// Gültiger Arbeitsbereich für Kartenklicks
    #[serde(default)]
    pub area_of_interest: GeoBounds,

    // ── Verdichtung ──────────────────────────────────────────────
    /// Ellipsen-Vorschau: Grad je Stützpunkt
    #[serde(default = "default_preview_densify_deg")]
    pub preview_densify_deg: f64,
    /// Endgültige Ellipse: Grad je Stützpunkt
    #[serde(default = "default_final_densify_deg")]
    pub final_densify_deg: f64,
    /// Geodätische Linien: Meter je Stützpunkt
    #[serde(default = "default_line_densify_m")]
    pub line_densify_m: f64,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            linear_unit: LinearUnit::Meters,
            azimuth_unit: AzimuthUnit::Degrees,
            ellipse_mode: EllipseMode::Semi,
            coordinate_format: CoordinateFormat::Dd,
            major_axis_limit_m: MAJOR_AXIS_LIMIT_M,
            area_of_interest: GeoBounds::WORLD,
            preview_densify_deg: DEFAULT_PREVIEW_DENSIFY_DEG,
            final_densify_deg: DEFAULT_FINAL_DENSIFY_DEG,
            line_densify_m: DEFAULT_LINE_DENSIFY_M,
        }
    }
}

/// Serde-Default für `major_axis_limit_m`.
fn default_major_axis_limit_m() -> f64 {
    MAJOR_AXIS_LIMIT_M
}

/// Serde-Default für `preview_densify_deg`.
fn default_preview_densify_deg() -> f64 {
    DEFAULT_PREVIEW_DENSIFY_DEG
}

/// Serde-Default für `final_densify_deg`.
fn default_final_densify_deg() -> f64 {
    DEFAULT_FINAL_DENSIFY_DEG
}

/// Serde-Default für `line_densify_m`.
fn default_line_densify_m() -> f64 {
    DEFAULT_LINE_DENSIFY_M
}

impl ToolOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("dd-shape-builder"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Verdichtung für Ellipsen-Vorschauen.
    pub fn preview_densify(&self) -> DensifyPolicy {
        DensifyPolicy::ByAngle(self.preview_densify_deg)
    }

    /// Verdichtung für endgültige Ellipsen und Ringe.
    pub fn final_densify(&self) -> DensifyPolicy {
        DensifyPolicy::ByAngle(self.final_densify_deg)
    }

    /// Verdichtung für geodätische Linien.
    pub fn line_densify(&self) -> DensifyPolicy {
        DensifyPolicy::ByLength(self.line_densify_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let opts: ToolOptions = toml::from_str("linear_unit = \"kilometers\"\n").unwrap();
        assert_eq!(opts.linear_unit, LinearUnit::Kilometers);
        assert_eq!(opts.azimuth_unit, AzimuthUnit::Degrees);
        assert_eq!(opts.major_axis_limit_m, MAJOR_AXIS_LIMIT_M);
        assert_eq!(opts.area_of_interest, GeoBounds::WORLD);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "dd_shape_builder_options_test_{}.toml",
            std::process::id()
        ));
        let opts = ToolOptions {
            azimuth_unit: AzimuthUnit::Mils,
            ellipse_mode: EllipseMode::Full,
            coordinate_format: CoordinateFormat::Dms,
            major_axis_limit_m: 5_000.0,
            ..ToolOptions::default()
        };
        opts.save_to_file(&path).unwrap();
        let loaded = ToolOptions::load_from_file(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, opts);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::path::Path::new("/nonexistent/dd_shape_builder.toml");
        assert_eq!(ToolOptions::load_from_file(path), ToolOptions::default());
    }

    #[test]
    fn test_ellipse_mode_factor() {
        assert_eq!(EllipseMode::Semi.display_factor(), 1.0);
        assert_eq!(EllipseMode::Full.display_factor(), 2.0);
        assert_eq!("full".parse::<EllipseMode>(), Ok(EllipseMode::Full));
    }
}
