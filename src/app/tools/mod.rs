//! Trait-basiertes Form-Tool-System für geodätische Formen.
//!
//! Jedes Tool implementiert den `ShapeTool`-Trait und wird beim
//! `ToolManager` registriert. Tools erzeugen reine Daten (`ToolResult`),
//! die Übergabe an den Host erfolgt zentral im Controller.

/// Gemeinsame Hilfsfunktionen für Form-Tools.
pub mod common;
/// Ellipsen-Tool: Mittelpunkt, Hauptachse + Azimut, Nebenachse.
pub mod ellipse;
/// Geodätische Linie zwischen zwei Punkten.
pub mod line;
/// Entfernungsringe mit optionalen Radialen.
pub mod range_rings;
/// ShapeTool-Trait: Schnittstelle für alle Form-Tools.
mod shape_tool;
#[cfg(test)]
pub(crate) mod test_support;

pub use shape_tool::ShapeTool;

use crate::core::{AreaOfInterest, GeodeticEngine, Polyline};
use crate::shared::ShapeError;
use glam::DVec2;
use serde::Serialize;
use std::collections::BTreeMap;

// ── Gemeinsame Utilities ─────────────────────────────────────

/// Prüft einen Kartenklick gegen den Arbeitsbereich.
pub fn check_area(pos: DVec2, area: &dyn AreaOfInterest) -> Result<(), ShapeError> {
    if area.is_valid(pos) {
        Ok(())
    } else {
        log::warn!("Klick außerhalb des Arbeitsbereichs: ({:.6}, {:.6})", pos.x, pos.y);
        Err(ShapeError::OutOfArea { x: pos.x, y: pos.y })
    }
}

// ── Typen ────────────────────────────────────────────────────────

/// Externe Dienste, die ein Tool pro Ereignis benötigt.
#[derive(Clone, Copy)]
pub struct ToolContext<'a> {
    /// Geodätische Engine
    pub engine: &'a dyn GeodeticEngine,
    /// Arbeitsbereichs-Prüfung für Klicks
    pub area: &'a dyn AreaOfInterest,
}

/// Rückgabe von `on_click` / `on_enter` / `on_mouse_move`, steuert den Tool-Flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    /// Punkt registriert, weitere Eingabe nötig
    Continue,
    /// Alle nötigen Eingaben vorhanden, bereit zur Ausführung
    ReadyToExecute,
    /// Vorschau aktualisiert
    UpdatePreview,
    /// Eingabe ignoriert (z.B. dritter Punkt jenseits der Hauptachse)
    Ignored,
}

/// Art der erzeugten Form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Geodätische Linie
    Line,
    /// Geodätische Ellipse
    Ellipse,
    /// Entfernungsringe
    RangeRings,
}

impl std::str::FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" | "linie" => Ok(Self::Line),
            "ellipse" => Ok(Self::Ellipse),
            "rings" | "range_rings" | "rangerings" => Ok(Self::RangeRings),
            _ => Err(ShapeError::InvalidInput(s.to_string())),
        }
    }
}

/// Editierbare Felder der Tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeField {
    /// Hauptachse (Ellipse)
    MajorAxis,
    /// Nebenachse (Ellipse)
    MinorAxis,
    /// Azimut / Peilung
    Azimuth,
    /// Distanz (Linie)
    Distance,
    /// Anzahl Ringe
    RingCount,
    /// Ring-Abstand
    RingInterval,
    /// Anzahl Radialen
    RadialCount,
}

impl ShapeField {
    /// Attribut-/Feldname
    pub fn name(self) -> &'static str {
        match self {
            ShapeField::MajorAxis => "majorAxis",
            ShapeField::MinorAxis => "minorAxis",
            ShapeField::Azimuth => "azimuth",
            ShapeField::Distance => "distance",
            ShapeField::RingCount => "ringCount",
            ShapeField::RingInterval => "ringInterval",
            ShapeField::RadialCount => "radialCount",
        }
    }
}

impl std::str::FromStr for ShapeField {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" | "majoraxis" => Ok(Self::MajorAxis),
            "minor" | "minoraxis" => Ok(Self::MinorAxis),
            "azimuth" | "az" | "bearing" => Ok(Self::Azimuth),
            "distance" | "dist" => Ok(Self::Distance),
            "rings" | "ringcount" => Ok(Self::RingCount),
            "interval" | "ringinterval" => Ok(Self::RingInterval),
            "radials" | "radialcount" => Ok(Self::RadialCount),
            _ => Err(ShapeError::InvalidInput(s.to_string())),
        }
    }
}

/// Preview-Geometrie für das Rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToolPreview {
    /// Vorschau-Umrisse (Ellipse, Ringe, Linien)
    pub outlines: Vec<Polyline>,
    /// Markierte Punkte (Anker, abgeleitete Punkte)
    pub markers: Vec<DVec2>,
}

impl ToolPreview {
    /// Enthält die Vorschau Geometrie?
    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty() && self.markers.is_empty()
    }

    /// Verwirft alle Vorschau-Geometrie.
    pub fn clear(&mut self) {
        self.outlines.clear();
        self.markers.clear();
    }
}

/// Attributwert einer fertigen Form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Zahl
    Number(f64),
    /// Text (z.B. Einheiten-Label)
    Text(String),
}

/// Ergebnis eines Form-Tools: reine Daten, keine Mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    /// Art der Form
    pub kind: ShapeKind,
    /// Endgültige Geometrie (ein oder mehrere Umrisse/Linien)
    pub geometries: Vec<Polyline>,
    /// Beschreibende Attribute
    pub attributes: BTreeMap<&'static str, AttributeValue>,
    /// Optionale Beschriftung
    pub label: Option<String>,
}

impl ToolResult {
    /// Zahl-Attribut lesen.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.attributes.get(key)? {
            AttributeValue::Number(v) => Some(*v),
            AttributeValue::Text(_) => None,
        }
    }

    /// Text-Attribut lesen.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.attributes.get(key)? {
            AttributeValue::Text(s) => Some(s.as_str()),
            AttributeValue::Number(_) => None,
        }
    }
}

// ── ToolManager ──────────────────────────────────────────────────

/// Verwaltet registrierte Form-Tools und den aktiven Tool-Index.
pub struct ToolManager {
    tools: Vec<Box<dyn ShapeTool>>,
    active_index: Option<usize>,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolManager {
    /// Erstellt einen neuen ToolManager mit vorregistrierten Standard-Tools.
    pub fn new() -> Self {
        Self::with_settings(common::ToolSettings::default())
    }

    /// Registriert die Standard-Tools mit gemeinsamen Einstellungen.
    pub fn with_settings(settings: common::ToolSettings) -> Self {
        let mut manager = Self {
            tools: Vec::new(),
            active_index: None,
        };
        manager.register(Box::new(line::LineTool::with_settings(settings.clone())));
        manager.register(Box::new(ellipse::EllipseTool::with_settings(settings.clone())));
        manager.register(Box::new(range_rings::RangeRingsTool::with_settings(settings)));
        manager
    }

    /// Registriert ein neues Form-Tool.
    pub fn register(&mut self, tool: Box<dyn ShapeTool>) {
        self.tools.push(tool);
    }

    /// Gibt die Anzahl registrierter Tools zurück.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Gibt Name und Index aller registrierten Tools zurück.
    pub fn tool_names(&self) -> Vec<(usize, &str)> {
        self.tools
            .iter()
            .enumerate()
            .map(|(i, t)| (i, t.name()))
            .collect()
    }

    /// Index des ersten Tools der gegebenen Art.
    pub fn index_of(&self, kind: ShapeKind) -> Option<usize> {
        self.tools.iter().position(|t| t.kind() == kind)
    }

    /// Setzt das aktive Form-Tool per Index.
    pub fn set_active(&mut self, index: usize) {
        if index < self.tools.len() {
            // Altes Tool zurücksetzen
            if let Some(old) = self.active_index {
                if old != index {
                    self.tools[old].reset();
                }
            }
            self.active_index = Some(index);
        }
    }

    /// Gibt den Index des aktiven Tools zurück.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Gibt eine Referenz auf das aktive Tool zurück.
    pub fn active_tool(&self) -> Option<&dyn ShapeTool> {
        self.active_index.map(|i| self.tools[i].as_ref())
    }

    /// Gibt eine mutable Referenz auf das aktive Tool zurück.
    pub fn active_tool_mut(&mut self) -> Option<&mut dyn ShapeTool> {
        let i = self.active_index?;
        Some(self.tools[i].as_mut())
    }

    /// Alle Tools.
    pub fn tools(&self) -> impl Iterator<Item = &dyn ShapeTool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    /// Alle Tools (z.B. für Einheiten- und Options-Wechsel).
    pub fn tools_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn ShapeTool>> {
        self.tools.iter_mut()
    }

    /// Setzt alle Tools zurück und deaktiviert das aktive Tool.
    pub fn reset(&mut self) {
        if let Some(i) = self.active_index {
            self.tools[i].reset();
        }
        self.active_index = None;
    }
}
