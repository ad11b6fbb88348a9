//! Fehler-Taxonomie der Form-Konstruktion.
//!
//! Alle mutierenden Tool-Operationen liefern `Result<_, ShapeError>`.
//! Der App-Layer reicht die Fehler über `anyhow` unverändert durch.

use thiserror::Error;

/// Fehler bei Eingabe, Validierung oder Geometrie-Erzeugung.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Negativer Eingabewert bzw. Azimut außerhalb des Wertebereichs seiner Einheit
    #[error("{field}: Wert {value} liegt außerhalb des gültigen Bereichs")]
    OutOfRange {
        /// Betroffenes Feld
        field: &'static str,
        /// Abgelehnter Wert
        value: f64,
    },

    /// Distanz überschreitet das Meter-Limit
    #[error("{field}: {meters:.0} m überschreitet das Limit von {limit:.0} m")]
    LimitExceeded {
        /// Betroffenes Feld
        field: &'static str,
        /// Wert in Metern
        meters: f64,
        /// Aktives Limit in Metern
        limit: f64,
    },

    /// Neben-Achse größer als Haupt-Achse (oder umgekehrt)
    #[error("Nebenachse ({minor}) darf nicht größer als die Hauptachse ({major}) sein")]
    AxisOrder {
        /// Haupt-Halbachse in der Eingabe-Einheit
        major: f64,
        /// Neben-Halbachse in der Eingabe-Einheit
        minor: f64,
    },

    /// Text konnte nicht als Zahl gelesen werden
    #[error("Ungültige Eingabe: '{0}'")]
    InvalidInput(String),

    /// Einheit unbekannt oder Konvertierung nicht definiert
    #[error("Nicht unterstützte Einheit: '{0}'")]
    UnsupportedUnit(String),

    /// Kartenpunkt liegt außerhalb des Arbeitsbereichs
    #[error("Punkt ({x:.6}, {y:.6}) liegt außerhalb des Arbeitsbereichs")]
    OutOfArea {
        /// X / Längengrad
        x: f64,
        /// Y / Breitengrad
        y: f64,
    },

    /// Geodätische Engine lieferte kein Ergebnis
    #[error("Geometrie konnte nicht erzeugt werden: {0}")]
    GeometryConstruction(&'static str),

    /// Abschluss angefordert, obwohl Eingaben fehlen
    #[error("Form unvollständig: {0}")]
    IncompleteShape(&'static str),

    /// Das aktive Tool bietet dieses Feld nicht an
    #[error("Feld '{0}' wird vom aktiven Tool nicht unterstützt")]
    UnknownField(&'static str),
}

impl ShapeError {
    /// Darf der Fehler während einer Live-Vorschau lokal geschluckt werden?
    pub fn is_preview_recoverable(&self) -> bool {
        matches!(self, ShapeError::GeometryConstruction(_))
    }
}
