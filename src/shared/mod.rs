//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Fehler-Taxonomie und Konfiguration, die von `core`, `app`
//! und dem Host gleichermaßen genutzt werden.

mod error;
pub mod options;

pub use error::ShapeError;
pub use options::{EllipseMode, ToolOptions};
pub use options::{DEFAULT_FINAL_DENSIFY_DEG, DEFAULT_PREVIEW_DENSIFY_DEG, MAJOR_AXIS_LIMIT_M};
