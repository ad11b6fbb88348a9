//! Gemeinsame Hilfsfunktionen für Form-Tools.
//!
//! Aufgeteilt in:
//! - `field`     — FieldMirror, format_value, parse_value
//! - `geometry`  — derive_axis_point
//! - `quantity`  — Distance, Angle, DistanceSlot, Validierung
//! - `lifecycle` — ToolSettings, impl_settings_delegation

mod field;
mod geometry;
mod lifecycle;
mod quantity;

pub use field::{format_value, parse_value, FieldMirror};
pub use geometry::derive_axis_point;
pub use lifecycle::ToolSettings;
pub use quantity::{
    round_to, trim_precision, validate_azimuth, validate_distance, Angle, Distance, DistanceSlot,
};
