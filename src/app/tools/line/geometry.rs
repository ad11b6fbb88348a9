//! Ergebnis-Aufbau des Linien-Tools.

use super::super::{AttributeValue, ShapeKind, ToolResult};
use crate::core::{AzimuthUnit, LinearUnit, Polyline};
use glam::DVec2;
use std::collections::BTreeMap;

/// Eingabe für das Endergebnis, bereits in Anzeige-Einheiten.
pub(crate) struct LineSummary {
    pub start: DVec2,
    pub end: DVec2,
    pub distance: f64,
    pub azimuth: f64,
    pub linear_unit: LinearUnit,
    pub azimuth_unit: AzimuthUnit,
}

pub(crate) fn build_result(line: Polyline, summary: &LineSummary) -> ToolResult {
    let mut attributes = BTreeMap::new();
    attributes.insert("distance", AttributeValue::Number(summary.distance));
    attributes.insert("azimuth", AttributeValue::Number(summary.azimuth));
    attributes.insert("startX", AttributeValue::Number(summary.start.x));
    attributes.insert("startY", AttributeValue::Number(summary.start.y));
    attributes.insert("endX", AttributeValue::Number(summary.end.x));
    attributes.insert("endY", AttributeValue::Number(summary.end.y));
    attributes.insert(
        "distanceUnitLabel",
        AttributeValue::Text(summary.linear_unit.label().to_string()),
    );
    attributes.insert(
        "angleUnitLabel",
        AttributeValue::Text(summary.azimuth_unit.label().to_string()),
    );

    ToolResult {
        kind: ShapeKind::Line,
        geometries: vec![line],
        attributes,
        label: None,
    }
}
