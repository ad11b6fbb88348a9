//! DD Shape Builder Library.
//! Geodätische Form-Konstruktion (Linie, Ellipse, Entfernungsringe) als
//! Library exportiert für Host, Tests und Benchmarks.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, EditorToolState, ShapeField, ShapeKind,
    ShapeTool, ToolAction, ToolResult,
};
pub use core::{
    AreaOfInterest, AzimuthUnit, CoordinateFormat, DensifyPolicy, Ellipsoid, EllipsoidalEngine,
    GeoBounds, GeodeticEngine, LinearUnit, Polyline,
};
pub use shared::{EllipseMode, ShapeError, ToolOptions};
