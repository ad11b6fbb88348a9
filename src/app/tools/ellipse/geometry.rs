//! Geometrie des Ellipsen-Tools (Umriss, Attribute, Beschriftung).

use super::super::common::{format_value, Distance};
use super::super::{AttributeValue, ShapeKind, ToolResult};
use crate::core::{AzimuthUnit, DensifyPolicy, GeodeticEngine, LinearUnit, Polyline};
use glam::DVec2;
use std::collections::BTreeMap;

/// Nebenachse für die Vorschau: ungesetzt → Hauptachse, sonst `min(minor, major)`.
pub(crate) fn preview_minor(major: f64, minor: f64) -> f64 {
    if minor <= 0.0 {
        major
    } else {
        minor.min(major)
    }
}

/// Ellipsen-Umriss; die Nebenachse wird in die Einheit der Hauptachse umgerechnet.
pub(crate) fn ellipse_outline(
    engine: &dyn GeodeticEngine,
    center: DVec2,
    major: Distance,
    minor: Distance,
    azimuth_deg: f64,
    densify: DensifyPolicy,
) -> Option<Polyline> {
    let minor_in_major_unit = minor.in_unit(major.unit);
    engine.ellipse_outline(
        center,
        major.unit,
        major.value,
        minor_in_major_unit,
        azimuth_deg,
        densify,
    )
}

/// Eingabe für das Endergebnis, bereits in Anzeige-Einheiten.
pub(crate) struct EllipseSummary {
    pub center: DVec2,
    /// Angezeigte Hauptachse (Halb- oder Vollachse je nach Modus)
    pub major_display: f64,
    /// Angezeigte Nebenachse
    pub minor_display: f64,
    /// Volle Hauptachse (2 × Halbachse) in Anzeige-Einheit
    pub major_full: f64,
    /// Volle Nebenachse in Anzeige-Einheit
    pub minor_full: f64,
    pub azimuth: f64,
    pub linear_unit: LinearUnit,
    pub azimuth_unit: AzimuthUnit,
}

/// Beschriftung der fertigen Ellipse.
pub(crate) fn build_label(summary: &EllipseSummary) -> String {
    format!(
        "Major Axis: {} {}\nMinor Axis: {} {}\nAngle: {:.0} {}",
        format_value(summary.major_full),
        summary.linear_unit.label(),
        format_value(summary.minor_full),
        summary.linear_unit.label(),
        summary.azimuth,
        summary.azimuth_unit.label(),
    )
}

/// Baut das `ToolResult` aus Umriss und Zusammenfassung.
pub(crate) fn build_result(outline: Polyline, summary: &EllipseSummary) -> ToolResult {
    let mut attributes = BTreeMap::new();
    attributes.insert("majorAxis", AttributeValue::Number(summary.major_display));
    attributes.insert("minorAxis", AttributeValue::Number(summary.minor_display));
    attributes.insert("azimuth", AttributeValue::Number(summary.azimuth));
    attributes.insert("centerX", AttributeValue::Number(summary.center.x));
    attributes.insert("centerY", AttributeValue::Number(summary.center.y));
    attributes.insert(
        "distanceUnitLabel",
        AttributeValue::Text(summary.linear_unit.label().to_string()),
    );
    attributes.insert(
        "angleUnitLabel",
        AttributeValue::Text(summary.azimuth_unit.label().to_string()),
    );

    ToolResult {
        kind: ShapeKind::Ellipse,
        geometries: vec![outline],
        attributes,
        label: Some(build_label(summary)),
    }
}
