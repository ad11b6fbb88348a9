//! Referenz-Ellipsoid für die geodätischen Berechnungen.

use serde::{Deserialize, Serialize};

/// Rotationsellipsoid, definiert durch große Halbachse und Abplattung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Große Halbachse (Äquatorradius) in Metern
    pub semi_major_m: f64,
    /// Abplattung f
    pub flattening: f64,
}

impl Ellipsoid {
    /// WGS 84 (a = 6 378 137 m, 1/f = 298.257223563).
    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major_m: 6_378_137.0,
        flattening: 1.0 / 298.257_223_563,
    };

    /// Kleine Halbachse (Polradius) in Metern.
    pub fn semi_minor_m(&self) -> f64 {
        self.semi_major_m * (1.0 - self.flattening)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
