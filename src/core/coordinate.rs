//! Anzeige-Formate für geographische Koordinaten (DD, DDM, DMS).

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Darstellungsformat einer Koordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateFormat {
    /// Dezimalgrad: `52.500000 N 13.400000 E`
    #[default]
    Dd,
    /// Grad + Dezimalminuten: `52° 30.0000' N`
    Ddm,
    /// Grad, Minuten, Sekunden: `52° 30' 00.00" N`
    Dms,
}

impl CoordinateFormat {
    /// Alle Formate in Anzeige-Reihenfolge.
    pub const ALL: [CoordinateFormat; 3] = [
        CoordinateFormat::Dd,
        CoordinateFormat::Ddm,
        CoordinateFormat::Dms,
    ];

    /// Formatiert einen Punkt (x = Länge, y = Breite) als "Breite Länge".
    pub fn format(self, point: DVec2) -> String {
        let mut out = String::with_capacity(40);
        self.write_component(&mut out, point.y, ['N', 'S']);
        out.push(' ');
        self.write_component(&mut out, point.x, ['E', 'W']);
        out
    }

    fn write_component(self, out: &mut String, value: f64, hemispheres: [char; 2]) {
        let hemi = if value < 0.0 {
            hemispheres[1]
        } else {
            hemispheres[0]
        };
        let abs = value.abs();
        let _ = match self {
            CoordinateFormat::Dd => write!(out, "{abs:.6} {hemi}"),
            CoordinateFormat::Ddm => {
                let (deg, minutes) = split_minutes(abs, 4);
                write!(out, "{deg}° {minutes:07.4}' {hemi}")
            }
            CoordinateFormat::Dms => {
                let total_seconds = round_to(abs * 3600.0, 2);
                let deg = (total_seconds / 3600.0).floor();
                let rest = total_seconds - deg * 3600.0;
                let minutes = (rest / 60.0).floor();
                let seconds = rest - minutes * 60.0;
                write!(out, "{deg}° {minutes:02}' {seconds:05.2}\" {hemi}")
            }
        };
    }
}

impl std::str::FromStr for CoordinateFormat {
    type Err = crate::shared::ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dd" => Ok(Self::Dd),
            "ddm" => Ok(Self::Ddm),
            "dms" => Ok(Self::Dms),
            _ => Err(crate::shared::ShapeError::InvalidInput(s.to_string())),
        }
    }
}

/// Zerlegt Dezimalgrad in ganze Grad und gerundete Minuten (ohne 60'-Überlauf).
fn split_minutes(abs: f64, decimals: i32) -> (f64, f64) {
    let total_minutes = round_to(abs * 60.0, decimals);
    let deg = (total_minutes / 60.0).floor();
    (deg, total_minutes - deg * 60.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dd() {
        let s = CoordinateFormat::Dd.format(DVec2::new(-13.4, 52.5));
        assert_eq!(s, "52.500000 N 13.400000 W");
    }

    #[test]
    fn test_format_ddm() {
        let s = CoordinateFormat::Ddm.format(DVec2::new(13.4, -52.5));
        assert_eq!(s, "52° 30.0000' S 13° 24.0000' E");
    }

    #[test]
    fn test_format_dms_rounding_carries_into_minutes() {
        // 0.9999999° → 1° 00' 00.00"
        let s = CoordinateFormat::Dms.format(DVec2::new(0.999_999_9, 0.0));
        assert_eq!(s, "0° 00' 00.00\" N 1° 00' 00.00\" E");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("DMS".parse::<CoordinateFormat>(), Ok(CoordinateFormat::Dms));
        assert!("utm".parse::<CoordinateFormat>().is_err());
    }
}
