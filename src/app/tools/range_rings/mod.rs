//! Entfernungsringe: konzentrische geodätische Kreise um einen Mittelpunkt,
//! optional mit Radialen bis zum äußersten Ring.
//!
//! **Klick-Ablauf:** Mittelpunkt → zweiter Klick legt den Ring-Abstand fest
//! und schließt ab. Enter schließt mit den eingegebenen Werten ab.
//!
//! **Eingabefelder:** Anzahl Ringe (≥ 1), Ring-Abstand (Limit gilt für
//! Anzahl × Abstand), Anzahl Radialen (≥ 0).

mod geometry;
mod lifecycle;
mod state;

pub use state::{Phase, RangeRingsTool};
