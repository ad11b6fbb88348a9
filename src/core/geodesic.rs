//! Geodätische Engine: Zielpunkt aus Distanz + Peilung, Ellipsen-Umriss,
//! geodätische Linie und deren Umkehrung (Länge + Anfangspeilung).
//!
//! Die Form-Tools kennen nur den `GeodeticEngine`-Trait. `EllipsoidalEngine`
//! ist die Referenz-Implementierung nach Vincenty auf einem Rotationsellipsoid.
//! Punkte sind `DVec2` mit x = Längengrad, y = Breitengrad (Grad).

use super::ellipsoid::Ellipsoid;
use super::units::LinearUnit;
use glam::DVec2;
use serde::Serialize;

/// Konvergenzschwelle der Vincenty-Iterationen (Radiant).
const VINCENTY_EPSILON: f64 = 1e-12;
/// Maximale Iterationen der Vincenty-Iterationen.
const VINCENTY_MAX_ITERATIONS: usize = 200;

/// Polylinie als Folge von Stützpunkten.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Polyline {
    /// Stützpunkte in Reihenfolge
    pub points: Vec<DVec2>,
}

impl Polyline {
    /// Erster Stützpunkt.
    pub fn from_point(&self) -> Option<DVec2> {
        self.points.first().copied()
    }

    /// Letzter Stützpunkt.
    pub fn to_point(&self) -> Option<DVec2> {
        self.points.last().copied()
    }

    /// Ist die Linie geschlossen (erster == letzter Punkt)?
    pub fn is_closed(&self) -> bool {
        match (self.from_point(), self.to_point()) {
            (Some(a), Some(b)) => self.points.len() > 2 && a.abs_diff_eq(b, 1e-12),
            _ => false,
        }
    }
}

/// Regel für die Anzahl der Stützpunkte gekrümmter Geometrie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DensifyPolicy {
    /// Ein Stützpunkt je `n` Grad Umlaufwinkel (Ellipsen/Kreise)
    ByAngle(f64),
    /// Maximaler Abstand zwischen Stützpunkten in Metern (Linien)
    ByLength(f64),
    /// Feste Anzahl Segmente
    ByCount(usize),
}

impl DensifyPolicy {
    /// Segmentanzahl für einen Umlauf (360°) bzw. eine Strecke der Länge `length_m`.
    fn segment_count(self, sweep_deg: f64, length_m: f64) -> usize {
        let raw = match self {
            DensifyPolicy::ByAngle(step) if step > 0.0 => (sweep_deg / step).ceil(),
            DensifyPolicy::ByLength(step) if step > 0.0 => (length_m / step).ceil(),
            DensifyPolicy::ByCount(n) => n as f64,
            _ => 1.0,
        };
        (raw.max(1.0) as usize).min(100_000)
    }
}

/// Länge und Anfangspeilung einer geodätischen Linie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicMeasure {
    /// Länge in der angefragten Einheit
    pub length: f64,
    /// Anfangspeilung in Grad [0, 360)
    pub initial_bearing_deg: f64,
}

/// Schnittstelle zur geodätischen Geometrie-Berechnung.
///
/// Alle Methoden liefern `None`, wenn keine Geometrie erzeugt werden kann
/// (nicht-endliche Eingaben, Pol-Ursprung, entartete Distanzen, …).
pub trait GeodeticEngine {
    /// Zielpunkt ausgehend von `origin` nach `distance` (in `unit`) unter `bearing_deg`.
    fn destination_point(
        &self,
        origin: DVec2,
        distance: f64,
        unit: LinearUnit,
        bearing_deg: f64,
    ) -> Option<DVec2>;

    /// Geschlossener Ellipsen-Umriss um `center`. Achsen sind Halbachsen in `unit`,
    /// `bearing_deg` ist die Richtung der Hauptachse.
    fn ellipse_outline(
        &self,
        center: DVec2,
        unit: LinearUnit,
        major_axis: f64,
        minor_axis: f64,
        bearing_deg: f64,
        densify: DensifyPolicy,
    ) -> Option<Polyline>;

    /// Geodätische Linie von `from` nach `to`.
    fn geodesic_line(
        &self,
        from: DVec2,
        to: DVec2,
        unit: LinearUnit,
        densify: DensifyPolicy,
    ) -> Option<Polyline>;

    /// Länge (in `unit`) und Anfangspeilung der geodätischen Linie `from` → `to`.
    fn measure(&self, from: DVec2, to: DVec2, unit: LinearUnit) -> Option<GeodesicMeasure>;
}

/// Vincenty-Engine auf einem Rotationsellipsoid (Standard: WGS 84).
#[derive(Debug, Clone, Copy, Default)]
pub struct EllipsoidalEngine {
    ellipsoid: Ellipsoid,
}

impl EllipsoidalEngine {
    /// Erstellt eine Engine für das angegebene Ellipsoid.
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    /// Engine auf WGS 84.
    pub fn wgs84() -> Self {
        Self::new(Ellipsoid::WGS84)
    }

    /// Vincenty-Direktaufgabe: (lon, lat) in Grad, Distanz in Metern.
    fn direct(&self, origin: DVec2, bearing_deg: f64, distance_m: f64) -> Option<DVec2> {
        if !origin.is_finite() || !bearing_deg.is_finite() || !distance_m.is_finite() {
            return None;
        }
        if distance_m < 0.0 || origin.y.abs() > 90.0 {
            return None;
        }
        if distance_m == 0.0 {
            return Some(origin);
        }

        let a = self.ellipsoid.semi_major_m;
        let f = self.ellipsoid.flattening;
        let b = self.ellipsoid.semi_minor_m();

        let (sin_alpha1, cos_alpha1) = bearing_deg.to_radians().sin_cos();
        let tan_u1 = (1.0 - f) * origin.y.to_radians().tan();
        let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
        let sin_u1 = tan_u1 * cos_u1;

        let sigma1 = tan_u1.atan2(cos_alpha1);
        let sin_alpha = cos_u1 * sin_alpha1;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let mut sigma = distance_m / (b * big_a);
        let mut cos_2sigma_m;
        let mut sin_sigma;
        let mut cos_sigma;
        let mut iterations = 0;
        loop {
            cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
            sin_sigma = sigma.sin();
            cos_sigma = sigma.cos();
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                                * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));
            let previous = sigma;
            sigma = distance_m / (b * big_a) + delta_sigma;
            iterations += 1;
            if (sigma - previous).abs() < VINCENTY_EPSILON {
                break;
            }
            if iterations >= VINCENTY_MAX_ITERATIONS {
                return None;
            }
        }

        let x = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
        let lat2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
            .atan2((1.0 - f) * (sin_alpha * sin_alpha + x * x).sqrt());
        let lambda = (sin_sigma * sin_alpha1)
            .atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let l = lambda
            - (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        let lon2 = normalize_longitude(origin.x + l.to_degrees());
        let result = DVec2::new(lon2, lat2.to_degrees());
        result.is_finite().then_some(result)
    }

    /// Vincenty-Umkehraufgabe: Distanz in Metern und Anfangspeilung in Grad.
    fn inverse(&self, from: DVec2, to: DVec2) -> Option<(f64, f64)> {
        if !from.is_finite() || !to.is_finite() || from.y.abs() > 90.0 || to.y.abs() > 90.0 {
            return None;
        }
        let a = self.ellipsoid.semi_major_m;
        let f = self.ellipsoid.flattening;
        let b = self.ellipsoid.semi_minor_m();

        let l = (to.x - from.x).to_radians();
        let u1 = ((1.0 - f) * from.y.to_radians().tan()).atan();
        let u2 = ((1.0 - f) * to.y.to_radians().tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = l;
        let mut iterations = 0;
        let (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m, sin_lambda, cos_lambda) = loop {
            let (sin_lambda, cos_lambda) = lambda.sin_cos();
            let t1 = cos_u2 * sin_lambda;
            let t2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
            let sin_sigma = (t1 * t1 + t2 * t2).sqrt();
            if sin_sigma == 0.0 {
                // identische Punkte
                return Some((0.0, 0.0));
            }
            let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            let sigma = sin_sigma.atan2(cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            let cos_2sigma_m = if cos_sq_alpha != 0.0 {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            } else {
                // Äquatorlinie
                0.0
            };
            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            let previous = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
            iterations += 1;
            if (lambda - previous).abs() < VINCENTY_EPSILON {
                break (
                    sin_sigma,
                    cos_sigma,
                    sigma,
                    cos_sq_alpha,
                    cos_2sigma_m,
                    sin_lambda,
                    cos_lambda,
                );
            }
            if iterations >= VINCENTY_MAX_ITERATIONS {
                // nahezu antipodal, keine Konvergenz
                return None;
            }
        };

        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));
        let distance = b * big_a * (sigma - delta_sigma);
        let alpha1 = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);

        Some((distance, normalize_bearing(alpha1.to_degrees())))
    }
}

impl GeodeticEngine for EllipsoidalEngine {
    fn destination_point(
        &self,
        origin: DVec2,
        distance: f64,
        unit: LinearUnit,
        bearing_deg: f64,
    ) -> Option<DVec2> {
        self.direct(origin, bearing_deg, unit.to_meters(distance))
    }

    fn ellipse_outline(
        &self,
        center: DVec2,
        unit: LinearUnit,
        major_axis: f64,
        minor_axis: f64,
        bearing_deg: f64,
        densify: DensifyPolicy,
    ) -> Option<Polyline> {
        let a = unit.to_meters(major_axis);
        let b = unit.to_meters(minor_axis);
        if !(a > 0.0 && b > 0.0) || !a.is_finite() || !b.is_finite() {
            return None;
        }

        let segments = densify.segment_count(360.0, 0.0);
        let step = 360.0 / segments as f64;
        let mut points = Vec::with_capacity(segments + 1);
        for i in 0..segments {
            // Winkel relativ zur Hauptachse; Radius aus der Polarform der Ellipse
            let theta = (i as f64 * step).to_radians();
            let (sin_t, cos_t) = theta.sin_cos();
            let radius = a * b / ((b * cos_t).powi(2) + (a * sin_t).powi(2)).sqrt();
            points.push(self.direct(center, bearing_deg + i as f64 * step, radius)?);
        }
        let first = points[0];
        points.push(first);
        Some(Polyline { points })
    }

    fn geodesic_line(
        &self,
        from: DVec2,
        to: DVec2,
        _unit: LinearUnit,
        densify: DensifyPolicy,
    ) -> Option<Polyline> {
        let (length_m, bearing) = self.inverse(from, to)?;
        if length_m == 0.0 {
            return None;
        }
        let segments = densify.segment_count(0.0, length_m);
        let mut points = Vec::with_capacity(segments + 1);
        points.push(from);
        for i in 1..segments {
            let s = length_m * i as f64 / segments as f64;
            points.push(self.direct(from, bearing, s)?);
        }
        points.push(to);
        Some(Polyline { points })
    }

    fn measure(&self, from: DVec2, to: DVec2, unit: LinearUnit) -> Option<GeodesicMeasure> {
        let (length_m, bearing) = self.inverse(from, to)?;
        Some(GeodesicMeasure {
            length: length_m / unit.meters_per_unit(),
            initial_bearing_deg: bearing,
        })
    }
}

/// Normalisiert eine Peilung auf [0, 360).
pub fn normalize_bearing(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Normalisiert einen Längengrad auf [-180, 180].
fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}
