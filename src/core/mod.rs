//! Core-Domänentypen: Einheiten, Ellipsoid, geodätische Engine,
//! Arbeitsbereich und Koordinaten-Formatierung.

pub mod area;
pub mod coordinate;
pub mod ellipsoid;
/// Geodätische Engine (Trait + Vincenty-Implementierung)
///
/// Die Form-Tools rufen ausschließlich den `GeodeticEngine`-Trait auf;
/// `EllipsoidalEngine` ist die mitgelieferte Referenz-Implementierung.
pub mod geodesic;
pub mod units;

pub use area::{AreaOfInterest, GeoBounds};
pub use coordinate::CoordinateFormat;
pub use ellipsoid::Ellipsoid;
pub use geodesic::{
    normalize_bearing, DensifyPolicy, EllipsoidalEngine, GeodesicMeasure, GeodeticEngine, Polyline,
};
pub use units::{convert_azimuth, convert_by_label, convert_distance, AzimuthUnit, LinearUnit};
