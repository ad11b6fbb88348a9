//! Text-Spiegel für editierbare Zahlenfelder.
//!
//! Jede Größe hat genau einen autoritativen Zahlenwert im Tool und einen
//! Text-Spiegel. Zahl → Text läuft immer über `format_value`, Text → Zahl
//! einmalig über `FieldMirror::take_text` und danach den Setter des Tools.

use crate::shared::ShapeError;

/// Formatiert einen Wert kanonisch: 2 Nachkommastellen, ohne abschließende Nullen.
pub fn format_value(value: f64) -> String {
    let mut s = format!("{:.2}", value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Liest einen Zahlenwert aus User-Text.
///
/// Akzeptiert führende/abschließende Leerzeichen und ein einzelnes
/// Dezimalkomma. Tausender-Trennzeichen werden abgelehnt: Text mit Komma
/// und Punkt, mehreren Kommas oder der Form `1,000` ist `InvalidInput`.
pub fn parse_value(text: &str) -> Result<f64, ShapeError> {
    let invalid = || ShapeError::InvalidInput(text.to_string());
    let trimmed = text.trim();
    let normalized = match trimmed.split_once(',') {
        None => trimmed.to_string(),
        Some((int, frac)) => {
            if trimmed.contains('.') || frac.contains(',') || looks_grouped(int, frac) {
                return Err(invalid());
            }
            format!("{int}.{frac}")
        }
    };
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid()),
    }
}

/// `1,000` / `-12,500`: ganzzahliger Teil ohne führende Null, genau drei
/// Ziffern nach dem Komma.
fn looks_grouped(int: &str, frac: &str) -> bool {
    let digits = int.trim_start_matches(['+', '-']);
    !digits.is_empty()
        && digits.len() <= 3
        && !digits.starts_with('0')
        && digits.chars().all(|c| c.is_ascii_digit())
        && frac.len() == 3
        && frac.chars().all(|c| c.is_ascii_digit())
}

/// Text-Spiegel eines Zahlenfelds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMirror {
    text: String,
    /// Stammt der aktuelle Text aus User-Eingabe (statt aus `show`)?
    user_text: bool,
    /// Wurde der User-Text vom Setter angenommen?
    applied: bool,
}

impl FieldMirror {
    /// Aktueller Text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stammt der Text aus einer User-Eingabe?
    pub fn is_user_text(&self) -> bool {
        self.user_text
    }

    /// Erzeugt den kanonischen Text aus dem autoritativen Wert.
    pub fn show(&mut self, value: f64) {
        self.text = format_value(value);
        self.user_text = false;
        self.applied = false;
    }

    /// Leert das Feld.
    pub fn clear(&mut self) {
        self.text.clear();
        self.user_text = false;
        self.applied = false;
    }

    /// Übernimmt User-Text und parst ihn.
    ///
    /// - `Ok(None)`: Text unverändert und bereits angenommen, kein Setter-Aufruf nötig
    /// - `Ok(Some(v))`: Wert an den Setter weiterreichen, danach `mark_applied`
    /// - `Err(InvalidInput)`: nicht parsebar; der Text bleibt trotzdem stehen
    ///
    /// Ein abgelehnter Text wird bei erneuter Eingabe wieder geparst.
    pub fn take_text(&mut self, text: &str) -> Result<Option<f64>, ShapeError> {
        if self.user_text && self.applied && self.text == text {
            return Ok(None);
        }
        self.text.clear();
        self.text.push_str(text);
        self.user_text = true;
        self.applied = false;
        parse_value(text).map(Some)
    }

    /// Markiert den aktuellen User-Text als vom Setter angenommen.
    pub fn mark_applied(&mut self) {
        self.applied = self.user_text;
    }
}
