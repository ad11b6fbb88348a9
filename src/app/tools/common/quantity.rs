//! Einheiten-behaftete Größen und deren Validierung.
//!
//! Jede gespeicherte Distanz und jeder Azimut trägt die Einheit, in der er
//! eingegeben wurde. Umgerechnet wird nur beim Lesen.

use crate::core::{convert_azimuth, convert_distance, AzimuthUnit, LinearUnit};
use crate::shared::ShapeError;

/// Anzahl Nachkommastellen, auf die gespeicherte Werte gerundet werden.
const STORED_DECIMALS: i32 = 6;

/// Rundet auf die gespeicherte Präzision.
pub fn trim_precision(value: f64) -> f64 {
    let factor = 10f64.powi(STORED_DECIMALS);
    (value * factor).round() / factor
}

/// Rundet auf `decimals` Nachkommastellen.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Distanz mit Einheit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    /// Zahlenwert
    pub value: f64,
    /// Einheit, in der der Wert eingegeben wurde
    pub unit: LinearUnit,
}

impl Distance {
    /// Null-Distanz in Metern.
    pub const ZERO: Distance = Distance {
        value: 0.0,
        unit: LinearUnit::Meters,
    };

    /// Erstellt eine Distanz.
    pub fn new(value: f64, unit: LinearUnit) -> Self {
        Self { value, unit }
    }

    /// Wert in Metern.
    pub fn meters(&self) -> f64 {
        self.unit.to_meters(self.value)
    }

    /// Wert in `unit`.
    pub fn in_unit(&self, unit: LinearUnit) -> f64 {
        convert_distance(self.value, self.unit, unit)
    }

    /// Ist die Distanz größer als 0?
    pub fn is_set(&self) -> bool {
        self.value > 0.0
    }

    /// Wert auf die gespeicherte Präzision gerundet.
    pub fn trimmed(self) -> Self {
        Self::new(trim_precision(self.value), self.unit)
    }
}

/// Azimut mit Einheit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    /// Zahlenwert
    pub value: f64,
    /// Einheit, in der der Wert eingegeben wurde
    pub unit: AzimuthUnit,
}

impl Angle {
    /// Null-Azimut (Nord) in Grad.
    pub const NORTH: Angle = Angle {
        value: 0.0,
        unit: AzimuthUnit::Degrees,
    };

    /// Erstellt einen Azimut.
    pub fn new(value: f64, unit: AzimuthUnit) -> Self {
        Self { value, unit }
    }

    /// Wert in Grad.
    pub fn degrees(&self) -> f64 {
        self.unit.to_degrees(self.value)
    }

    /// Wert in `unit`.
    pub fn in_unit(&self, unit: AzimuthUnit) -> f64 {
        convert_azimuth(self.value, self.unit, unit)
    }
}

/// Prüft Vorzeichen und Meter-Limit einer Distanz.
pub fn validate_distance(
    field: &'static str,
    distance: Distance,
    limit_m: f64,
) -> Result<(), ShapeError> {
    if !distance.value.is_finite() || distance.value < 0.0 {
        return Err(ShapeError::OutOfRange {
            field,
            value: distance.value,
        });
    }
    let meters = distance.meters();
    if meters > limit_m {
        return Err(ShapeError::LimitExceeded {
            field,
            meters,
            limit: limit_m,
        });
    }
    Ok(())
}

/// Prüft den Wertebereich eines Azimuts: `[0, Vollkreis]` seiner Einheit.
pub fn validate_azimuth(angle: Angle) -> Result<(), ShapeError> {
    if !angle.value.is_finite() || angle.value < 0.0 || angle.value > angle.unit.full_circle() {
        return Err(ShapeError::OutOfRange {
            field: "azimuth",
            value: angle.value,
        });
    }
    Ok(())
}

/// Distanz-Slot mit gültigem Wert und optionalem Rohwert.
///
/// Ein Wert, der das Limit überschreitet, wird als `pending` festgehalten
/// (für Anzeige und spätere Neu-Validierung), der gültige Wert bleibt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSlot {
    /// Letzter gültiger Wert
    pub valid: Distance,
    /// Abgelehnter Rohwert (Limit überschritten)
    pub pending: Option<Distance>,
}

impl Default for DistanceSlot {
    fn default() -> Self {
        Self {
            valid: Distance::ZERO,
            pending: None,
        }
    }
}

impl DistanceSlot {
    /// Prüft `distance` gegen Vorzeichen und Limit.
    ///
    /// Bei Limit-Verletzung wird der Rohwert als `pending` gespeichert.
    /// Gibt bei Erfolg den auf Präzision gerundeten Wert zurück, ohne ihn
    /// zu übernehmen (die Achsen-Reihenfolge prüft der Aufrufer).
    pub fn check(
        &mut self,
        field: &'static str,
        distance: Distance,
        limit_m: f64,
    ) -> Result<Distance, ShapeError> {
        match validate_distance(field, distance, limit_m) {
            Ok(()) => Ok(distance.trimmed()),
            Err(e @ ShapeError::LimitExceeded { .. }) => {
                self.pending = Some(distance);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Prüft den gültigen Wert gegen ein geändertes Limit.
    ///
    /// Überschreitet er es, wird er zum Rohwert und ist nicht mehr
    /// verwendbar, bis das Limit wieder passt oder ein neuer Wert kommt.
    pub fn recheck(&mut self, field: &'static str, limit_m: f64) -> Result<(), ShapeError> {
        if self.pending.is_some() || !self.valid.is_set() {
            return Ok(());
        }
        self.check(field, self.valid, limit_m).map(|_| ())
    }

    /// Übernimmt einen geprüften Wert und verwirft den Rohwert.
    pub fn commit(&mut self, distance: Distance) {
        self.valid = distance;
        self.pending = None;
    }

    /// Angezeigter Wert: Rohwert falls vorhanden, sonst gültiger Wert.
    pub fn shown(&self) -> Distance {
        self.pending.unwrap_or(self.valid)
    }

    /// Gültiger Wert > 0 und kein offener Rohwert.
    pub fn is_usable(&self) -> bool {
        self.pending.is_none() && self.valid.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_distance() {
        let limit = 20_000_000.0;
        assert!(validate_distance("d", Distance::new(5.0, LinearUnit::Meters), limit).is_ok());
        assert!(matches!(
            validate_distance("d", Distance::new(-1.0, LinearUnit::Meters), limit),
            Err(ShapeError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_distance("d", Distance::new(20_001.0, LinearUnit::Kilometers), limit),
            Err(ShapeError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn test_validate_azimuth_per_unit() {
        assert!(validate_azimuth(Angle::new(360.0, AzimuthUnit::Degrees)).is_ok());
        assert!(validate_azimuth(Angle::new(361.0, AzimuthUnit::Degrees)).is_err());
        assert!(validate_azimuth(Angle::new(-1.0, AzimuthUnit::Degrees)).is_err());
        assert!(validate_azimuth(Angle::new(361.0, AzimuthUnit::Mils)).is_ok());
        assert!(validate_azimuth(Angle::new(6401.0, AzimuthUnit::Mils)).is_err());
        assert!(validate_azimuth(Angle::new(399.0, AzimuthUnit::Gradians)).is_ok());
    }

    #[test]
    fn test_slot_keeps_raw_value_on_limit() {
        let mut slot = DistanceSlot::default();
        slot.commit(Distance::new(10.0, LinearUnit::Meters));
        let raw = Distance::new(30_000.0, LinearUnit::Kilometers);
        assert!(slot.check("majorAxis", raw, 20_000_000.0).is_err());
        assert_eq!(slot.valid.value, 10.0);
        assert_eq!(slot.pending, Some(raw));
        assert_eq!(slot.shown(), raw);
        assert!(!slot.is_usable());
    }

    #[test]
    fn test_slot_recheck_demotes_value_above_new_limit() {
        let mut slot = DistanceSlot::default();
        let value = Distance::new(5.0, LinearUnit::Kilometers);
        slot.commit(value);

        assert!(slot.recheck("majorAxis", 10_000.0).is_ok());
        assert!(slot.is_usable());

        assert!(matches!(
            slot.recheck("majorAxis", 1_000.0),
            Err(ShapeError::LimitExceeded { .. })
        ));
        assert_eq!(slot.pending, Some(value));
        assert!(!slot.is_usable());

        // Leerer Slot hat nichts zu prüfen
        assert!(DistanceSlot::default().recheck("d", 0.0).is_ok());
    }

    #[test]
    fn test_slot_check_trims_precision() {
        let mut slot = DistanceSlot::default();
        let d = slot
            .check("d", Distance::new(1.123_456_789, LinearUnit::Meters), 1e9)
            .unwrap();
        assert_eq!(d.value, 1.123_457);
    }
}
