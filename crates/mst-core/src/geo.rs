//! Geographic coordinate type and spherical geometry.
//!
//! `GeoPoint` uses `f64` latitude/longitude in degrees.  Every distance in
//! the system comes from [`haversine`]; the MST engine stores its output
//! verbatim, so edge weights never drift from the matrix the algorithms saw.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.  Fallback for `distance_radius_km`.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Below this `|sin(angular distance)|` slerp would divide by near-zero.
const SLERP_DEGENERATE_EPS: f64 = 1e-9;

/// A geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` on a sphere of `radius_km`.
    #[inline]
    pub fn distance_km(self, other: GeoPoint, radius_km: f64) -> f64 {
        haversine(self, other, radius_km)
    }

    /// Central angle (radians) between `self` and `other`.
    ///
    /// Uses the `atan2` form, which stays finite for antipodal pairs.  The
    /// haversine term is clamped to `[0, 1]` because rounding can push it a
    /// hair above 1 near the antipode, which would make `sqrt(1 - a)` NaN.
    pub fn central_angle(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
        let a = a.clamp(0.0, 1.0);

        2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Unit-sphere Cartesian coordinates `(x, y, z)`.
    #[inline]
    fn to_unit_vector(self) -> (f64, f64, f64) {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        (lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }

    #[inline]
    fn from_vector(x: f64, y: f64, z: f64) -> Self {
        let lat = z.atan2((x * x + y * y).sqrt());
        let lon = y.atan2(x);
        Self { lat: lat.to_degrees(), lon: lon.to_degrees() }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Haversine great-circle distance between `a` and `b` in the units of
/// `radius_km` (kilometres for the Earth).
///
/// Symmetric, zero for coincident points, never NaN or negative for valid
/// coordinates.
pub fn haversine(a: GeoPoint, b: GeoPoint, radius_km: f64) -> f64 {
    radius_km * a.central_angle(b)
}

// ── Great-circle interpolation ────────────────────────────────────────────────

/// Resolution knobs for [`great_circle_points`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GreatCircleOptions {
    pub min_segments:   u32,
    pub max_segments:   u32,
    /// `segments = round(distance_km * segment_factor)` before clamping.
    pub segment_factor: f64,
    pub radius_km:      f64,
}

impl Default for GreatCircleOptions {
    fn default() -> Self {
        Self {
            min_segments:   6,
            max_segments:   128,
            segment_factor: 0.2,
            radius_km:      EARTH_RADIUS_KM,
        }
    }
}

impl GreatCircleOptions {
    /// Segment count for a geodesic of `distance_km`.  Never below 1.
    pub fn segment_count(&self, distance_km: f64) -> u32 {
        let raw = (distance_km * self.segment_factor).round();
        let raw = if raw.is_finite() && raw > 0.0 { raw.min(u32::MAX as f64) as u32 } else { 0 };
        raw.clamp(self.min_segments, self.max_segments.max(self.min_segments)).max(1)
    }
}

/// Polyline approximating the geodesic from `a` to `b` by spherical linear
/// interpolation.
///
/// The output has `segments + 1` points with `a` first and `b` last
/// (bit-exact: the endpoints are copied, not recomputed).  Coincident or
/// near-antipodal pairs, where `sin(angle)` underflows, fall back to `[a, b]`.
/// Pure and deterministic, which the geometry cache relies on.
pub fn great_circle_points(a: GeoPoint, b: GeoPoint, opts: &GreatCircleOptions) -> Vec<GeoPoint> {
    let d = a.central_angle(b);
    if d == 0.0 {
        return vec![a, b];
    }
    let denom = d.sin();
    if denom.abs() < SLERP_DEGENERATE_EPS {
        return vec![a, b];
    }

    let segments = opts.segment_count(opts.radius_km * d);
    let (ax, ay, az) = a.to_unit_vector();
    let (bx, by, bz) = b.to_unit_vector();

    let mut pts = Vec::with_capacity(segments as usize + 1);
    pts.push(a);
    for i in 1..segments {
        let f = i as f64 / segments as f64;
        let wa = ((1.0 - f) * d).sin() / denom;
        let wb = (f * d).sin() / denom;
        pts.push(GeoPoint::from_vector(
            wa * ax + wb * bx,
            wa * ay + wb * by,
            wa * az + wb * bz,
        ));
    }
    pts.push(b);
    pts
}

// ── Antimeridian handling ─────────────────────────────────────────────────────

/// Split a polyline wherever consecutive longitudes jump by more than
/// `threshold_deg`, so no drawn segment wraps across the whole map.
///
/// Returns borrowed sub-slices in order; a lone point between two jumps
/// becomes a single-point part.  An empty input yields no parts.
pub fn split_at_antimeridian(points: &[GeoPoint], threshold_deg: f64) -> Vec<&[GeoPoint]> {
    let mut parts = Vec::new();
    if points.is_empty() {
        return parts;
    }
    let mut start = 0;
    for i in 1..points.len() {
        if (points[i].lon - points[i - 1].lon).abs() > threshold_deg {
            parts.push(&points[start..i]);
            start = i;
        }
    }
    parts.push(&points[start..]);
    parts
}
