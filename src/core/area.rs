//! Prüfung, ob ein Kartenpunkt im gültigen Arbeitsbereich liegt.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Arbeitsbereichs-Prüfung für Kartenklicks.
pub trait AreaOfInterest {
    /// Liegt `point` (x = Länge, y = Breite) im Arbeitsbereich?
    fn is_valid(&self, point: DVec2) -> bool;
}

/// Rechteckiger geographischer Bereich in Grad (Grenzen inklusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// Minimale Länge
    pub min_lon: f64,
    /// Minimale Breite
    pub min_lat: f64,
    /// Maximale Länge
    pub max_lon: f64,
    /// Maximale Breite
    pub max_lat: f64,
}

impl GeoBounds {
    /// Gesamte Erdoberfläche.
    pub const WORLD: GeoBounds = GeoBounds {
        min_lon: -180.0,
        min_lat: -90.0,
        max_lon: 180.0,
        max_lat: 90.0,
    };

    /// Erstellt Grenzen aus zwei beliebigen Eckpunkten.
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            min_lon: min.x,
            min_lat: min.y,
            max_lon: max.x,
            max_lat: max.y,
        }
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::WORLD
    }
}

impl AreaOfInterest for GeoBounds {
    fn is_valid(&self, point: DVec2) -> bool {
        point.is_finite()
            && (self.min_lon..=self.max_lon).contains(&point.x)
            && (self.min_lat..=self.max_lat).contains(&point.y)
    }
}
