//! Linien-Tool: Zeichnet eine geodätische Linie zwischen zwei Punkten.
//!
//! **Klick-Ablauf:** Startpunkt → Endpunkt (schließt ab). Zwischen den
//! Klicks folgt die Vorschau der Maus und füllt Distanz und Azimut.
//!
//! **Eingabefelder:** Distanz und Azimut leiten den Endpunkt vom Startpunkt
//! ab; Enter schließt ab, sobald Startpunkt und Distanz > 0 vorliegen.
//!
//! Aufgeteilt in:
//! - `state`      — Struct, Phase, Setter mit Validierung und Ableitung
//! - `lifecycle`  — ShapeTool-Implementierung
//! - `geometry`   — Linie und Attribute

mod geometry;
mod lifecycle;
mod state;

pub use state::{LineTool, Phase};

#[cfg(test)]
mod tests;
