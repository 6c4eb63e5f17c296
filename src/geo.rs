//! Great-circle distance and bearing between geodetic points.
//!
//! Pure functions, no state — mirrors the `Distance` trait in the teacher's
//! `data.rs`, but computes true geodesic quantities (haversine distance,
//! initial bearing) instead of a flat squared-Euclidean approximation, since
//! callers need meter-accurate lengths and compass headings, not just a
//! nearest-node ranking key.

/// Mean Earth radius, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geodetic point: degrees of latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between `a` and `b`, in meters (haversine formula).
///
/// Symmetric to within floating-point rounding: `distance(a, b) == distance(b, a)`.
pub fn distance(a: Point, b: Point) -> f64 {
    let (phi_a, phi_b) = (a.lat.to_radians(), b.lat.to_radians());
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let sin_half_phi = (d_phi / 2.0).sin();
    let sin_half_lambda = (d_lambda / 2.0).sin();
    let h = sin_half_phi * sin_half_phi
        + phi_a.cos() * phi_b.cos() * sin_half_lambda * sin_half_lambda;
    let c = 2.0 * h.sqrt().asin();
    EARTH_RADIUS_M * c
}

/// Initial bearing from `a` to `b`, in degrees clockwise from north, `[0, 360)`.
pub fn bearing(a: Point, b: Point) -> f64 {
    let (phi_a, phi_b) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lambda = (b.lng - a.lng).to_radians();

    let y = d_lambda.sin() * phi_b.cos();
    let x = phi_a.cos() * phi_b.sin() - phi_a.sin() * phi_b.cos() * d_lambda.cos();
    let theta = y.atan2(x).to_degrees();
    (theta + 360.0) % 360.0
}

/// Reduces an angle difference modulo 360 and folds it into `(-180, 180]`.
pub fn normalise_angle(delta: f64) -> f64 {
    let reduced = delta % 360.0;
    let reduced = if reduced <= -180.0 {
        reduced + 360.0
    } else if reduced > 180.0 {
        reduced - 360.0
    } else {
        reduced
    };
    // A second fold covers inputs with magnitude >= 360 after the first remainder
    // step produced something outside (-180, 180] by a single wraparound.
    if reduced <= -180.0 {
        reduced + 360.0
    } else if reduced > 180.0 {
        reduced - 360.0
    } else {
        reduced
    }
}
