//! Ellipsen-Tool: Konstruiert eine geodätische Ellipse um einen Mittelpunkt.
//!
//! **Klick-Ablauf:** Mittelpunkt → Ende der Hauptachse (legt Länge + Azimut fest)
//! → dritter Punkt (legt die Nebenachse fest, schließt automatisch ab).
//! Die Maus liefert zwischen den Klicks eine Live-Vorschau.
//!
//! **Eingabefelder:** Hauptachse, Nebenachse und Azimut können jederzeit als
//! Zahl oder Text gesetzt werden; Enter schließt ab, sobald Mittelpunkt und
//! beide Achsen vorliegen.
//!
//! Gespeichert werden immer Halbachsen. Der Modus `Full` verdoppelt nur die
//! angezeigten Werte.
//!
//! Aufgeteilt in:
//! - `state`      — Struct, Phase, Setter mit Validierung und Ableitung
//! - `lifecycle`  — ShapeTool-Implementierung (on_click, on_mouse_move, execute, …)
//! - `geometry`   — Umriss, Attribute und Beschriftung

pub(crate) mod geometry;
mod lifecycle;
mod state;

pub use state::{EllipseTool, Phase};
