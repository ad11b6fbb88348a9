//! Einheiten-Konvertierung für Distanzen und Azimute.
//!
//! Reine Funktionen ohne Zustand. Konvertiert wird immer über das Verhältnis
//! der Basisgrößen (Meter bzw. Vollkreis), damit A→B→C und A→C
//! innerhalb der Float-Toleranz übereinstimmen.

use crate::shared::ShapeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lineare Distanz-Einheit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearUnit {
    /// Meter
    #[default]
    Meters,
    /// Kilometer
    Kilometers,
    /// Internationale Landmeile
    Miles,
    /// Seemeile
    NauticalMiles,
    /// Internationaler Fuß
    Feet,
    /// Yard
    Yards,
}

impl LinearUnit {
    /// Alle unterstützten Einheiten in Anzeige-Reihenfolge.
    pub const ALL: [LinearUnit; 6] = [
        LinearUnit::Meters,
        LinearUnit::Kilometers,
        LinearUnit::Miles,
        LinearUnit::NauticalMiles,
        LinearUnit::Feet,
        LinearUnit::Yards,
    ];

    /// Meter pro Einheit.
    pub fn meters_per_unit(self) -> f64 {
        match self {
            LinearUnit::Meters => 1.0,
            LinearUnit::Kilometers => 1000.0,
            LinearUnit::Miles => 1609.344,
            LinearUnit::NauticalMiles => 1852.0,
            LinearUnit::Feet => 0.3048,
            LinearUnit::Yards => 0.9144,
        }
    }

    /// Kurzes Label für Attribute und Beschriftungen.
    pub fn label(self) -> &'static str {
        match self {
            LinearUnit::Meters => "Meters",
            LinearUnit::Kilometers => "Kilometers",
            LinearUnit::Miles => "Miles",
            LinearUnit::NauticalMiles => "Nautical Miles",
            LinearUnit::Feet => "Feet",
            LinearUnit::Yards => "Yards",
        }
    }

    /// Rechnet einen Wert dieser Einheit in Meter um.
    pub fn to_meters(self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }
}

impl fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LinearUnit {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(Self::Meters),
            "km" | "kilometer" | "kilometers" => Ok(Self::Kilometers),
            "mi" | "mile" | "miles" => Ok(Self::Miles),
            "nm" | "nmi" | "nautical_miles" | "nautical miles" => Ok(Self::NauticalMiles),
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            "yd" | "yard" | "yards" => Ok(Self::Yards),
            _ => Err(ShapeError::UnsupportedUnit(s.to_string())),
        }
    }
}

/// Winkel-Einheit für Azimute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AzimuthUnit {
    /// Altgrad, Vollkreis 360
    #[default]
    Degrees,
    /// Artillerie-Strich (NATO), Vollkreis 6400
    Mils,
    /// Neugrad, Vollkreis 400
    Gradians,
}

impl AzimuthUnit {
    /// Alle unterstützten Einheiten in Anzeige-Reihenfolge.
    pub const ALL: [AzimuthUnit; 3] = [
        AzimuthUnit::Degrees,
        AzimuthUnit::Mils,
        AzimuthUnit::Gradians,
    ];

    /// Wert eines Vollkreises in dieser Einheit.
    pub fn full_circle(self) -> f64 {
        match self {
            AzimuthUnit::Degrees => 360.0,
            AzimuthUnit::Mils => 6400.0,
            AzimuthUnit::Gradians => 400.0,
        }
    }

    /// Label für Attribute und Beschriftungen.
    pub fn label(self) -> &'static str {
        match self {
            AzimuthUnit::Degrees => "Degrees",
            AzimuthUnit::Mils => "Mils",
            AzimuthUnit::Gradians => "Gradians",
        }
    }

    /// Rechnet einen Winkel dieser Einheit in Grad um.
    pub fn to_degrees(self, value: f64) -> f64 {
        convert_azimuth(value, self, AzimuthUnit::Degrees)
    }
}

impl fmt::Display for AzimuthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AzimuthUnit {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(Self::Degrees),
            "mil" | "mils" => Ok(Self::Mils),
            "grad" | "gon" | "gradian" | "gradians" => Ok(Self::Gradians),
            _ => Err(ShapeError::UnsupportedUnit(s.to_string())),
        }
    }
}

/// Konvertiert eine Distanz zwischen zwei linearen Einheiten.
pub fn convert_distance(value: f64, from: LinearUnit, to: LinearUnit) -> f64 {
    if from == to {
        return value;
    }
    value * from.meters_per_unit() / to.meters_per_unit()
}

/// Konvertiert einen Azimut zwischen zwei Winkel-Einheiten.
pub fn convert_azimuth(value: f64, from: AzimuthUnit, to: AzimuthUnit) -> f64 {
    if from == to {
        return value;
    }
    value * to.full_circle() / from.full_circle()
}

/// Konvertiert anhand von Einheiten-Labels (z.B. aus Config oder Host-Eingabe).
///
/// Beide Labels müssen zur selben Größenart gehören, sonst
/// `ShapeError::UnsupportedUnit`.
pub fn convert_by_label(value: f64, from: &str, to: &str) -> Result<f64, ShapeError> {
    if let (Ok(a), Ok(b)) = (from.parse::<LinearUnit>(), to.parse::<LinearUnit>()) {
        return Ok(convert_distance(value, a, b));
    }
    if let (Ok(a), Ok(b)) = (from.parse::<AzimuthUnit>(), to.parse::<AzimuthUnit>()) {
        return Ok(convert_azimuth(value, a, b));
    }
    Err(ShapeError::UnsupportedUnit(format!("{from} -> {to}")))
}
