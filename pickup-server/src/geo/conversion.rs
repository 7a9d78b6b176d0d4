//! Mile/degree conversion on the WGS84 ellipsoid.
//!
//! A degree of latitude is slightly longer near the poles, and a degree of
//! longitude shrinks with `cos(latitude)`. Both conversions use the local
//! radius of curvature at the given latitude.

use std::f64::consts::PI;

use crate::domain::{BoundingBox, Location};

/// WGS84 semi-major axis, in miles.
pub const SEMI_MAJOR_AXIS_MILES: f64 = 3963.190592;

/// WGS84 first eccentricity.
pub const ECCENTRICITY: f64 = 0.081819191;

/// `1 - (e·sin φ)²`, shared by both radii of curvature.
fn curvature_term(latitude: f64) -> f64 {
    let phi = latitude.to_radians();
    1.0 - (ECCENTRICITY * phi.sin()).powi(2)
}

/// Meridional radius of curvature M: miles per radian of latitude.
fn meridional_radius(latitude: f64) -> f64 {
    SEMI_MAJOR_AXIS_MILES * (1.0 - ECCENTRICITY * ECCENTRICITY) / curvature_term(latitude).powf(1.5)
}

/// Radius of the circle of latitude, N·cos φ: miles per radian of longitude.
fn parallel_radius(latitude: f64) -> f64 {
    SEMI_MAJOR_AXIS_MILES * latitude.to_radians().cos() / curvature_term(latitude).sqrt()
}

/// Degrees of latitude spanned by `miles` at `latitude`.
pub fn miles_to_deg_latitude(miles: f64, latitude: f64) -> f64 {
    miles * 180.0 / (PI * meridional_radius(latitude))
}

/// Degrees of longitude spanned by `miles` at `latitude`.
///
/// Diverges towards the poles; at exactly ±90° the result is infinite or NaN.
pub fn miles_to_deg_longitude(miles: f64, latitude: f64) -> f64 {
    miles * 180.0 / (PI * parallel_radius(latitude))
}

/// A `size`×`size` mile box centered on `center`.
pub fn bounding_box(size: f64, center: Location) -> BoundingBox {
    let half_lat = miles_to_deg_latitude(size, center.latitude) / 2.0;
    let half_lon = miles_to_deg_longitude(size, center.latitude) / 2.0;

    BoundingBox {
        left: center.longitude - half_lon,
        bottom: center.latitude - half_lat,
        right: center.longitude + half_lon,
        top: center.latitude + half_lat,
    }
}
