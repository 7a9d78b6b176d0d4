//! Geographic coordinates and derived keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in decimal degrees.
///
/// No bounds are enforced here; geometry code accepts any `f64` and lets
/// invalid input propagate as NaN. Use [`Location::validate`] at the
/// request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "lat")]
    pub latitude: f64,

    #[serde(rename = "long")]
    pub longitude: f64,
}

/// Error returned when a coordinate is outside the WGS84 range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid location ({latitude}, {longitude}): {reason}")]
pub struct InvalidLocation {
    latitude: f64,
    longitude: f64,
    reason: &'static str,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check the coordinate is finite and within latitude/longitude range.
    ///
    /// Latitude is restricted to the open interval (-90, 90) because the
    /// longitude conversion divides by `cos(latitude)`.
    pub fn validate(&self) -> Result<(), InvalidLocation> {
        let reason = if !self.latitude.is_finite() || !self.longitude.is_finite() {
            Some("coordinates must be finite")
        } else if self.latitude <= -90.0 || self.latitude >= 90.0 {
            Some("latitude must be strictly between -90 and 90")
        } else if !(-180.0..=180.0).contains(&self.longitude) {
            Some("longitude must be between -180 and 180")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(InvalidLocation {
                latitude: self.latitude,
                longitude: self.longitude,
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Coordinate rounded to 6 decimal places, as used in cache keys.
    pub fn key(&self) -> CoordKey {
        CoordKey::new(self)
    }
}

/// A coordinate rounded to 6 decimal places (about 0.1 m).
///
/// Two locations with the same key are treated as the same point when
/// pairing route summaries or keying cached routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    lat_micro: i64,
    lon_micro: i64,
}

impl CoordKey {
    fn new(location: &Location) -> Self {
        Self {
            lat_micro: (location.latitude * 1e6).round() as i64,
            lon_micro: (location.longitude * 1e6).round() as i64,
        }
    }
}

impl fmt::Display for CoordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6}-{:.6}",
            self.lat_micro as f64 / 1e6,
            self.lon_micro as f64 / 1e6
        )
    }
}

/// An axis-aligned box in degrees: (left, bottom, right, top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Location {
        Location::new(
            (self.bottom + self.top) / 2.0,
            (self.left + self.right) / 2.0,
        )
    }
}

/// One street ("way") geometry as an ordered, open sequence of points.
pub type StreetPolyline = Vec<Location>;
