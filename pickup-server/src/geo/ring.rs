//! Street/ring intersection.
//!
//! A ring of radius `r` miles around the rider is modelled as an ellipse in
//! degree space whose semi-axes are `r` converted to degrees of longitude
//! and latitude at the rider's latitude. Each street segment is rescaled
//! into the ellipse's unit-circle frame, where the crossing reduces to a
//! quadratic in the segment parameter `t`.

use crate::domain::Location;

use super::conversion::{miles_to_deg_latitude, miles_to_deg_longitude};

/// An axis-aligned ellipse in degree space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Location,

    /// Semi-axis along longitude, in degrees.
    pub semi_lon: f64,

    /// Semi-axis along latitude, in degrees.
    pub semi_lat: f64,
}

impl Ellipse {
    /// The degree-space ellipse covering `radius_miles` around `center`.
    pub fn ring(center: Location, radius_miles: f64) -> Self {
        Self {
            center,
            semi_lon: miles_to_deg_longitude(radius_miles, center.latitude),
            semi_lat: miles_to_deg_latitude(radius_miles, center.latitude),
        }
    }

    /// Squared normalized distance of `point` from the center; 1.0 on the boundary.
    pub fn normalized_distance_sq(&self, point: &Location) -> f64 {
        let x = (point.longitude - self.center.longitude) / self.semi_lon;
        let y = (point.latitude - self.center.latitude) / self.semi_lat;
        x * x + y * y
    }
}

/// Points where the segment `p1 → p2` crosses the ellipse boundary.
///
/// Returns zero, one or two points ordered by distance along the segment
/// from `p1`. Only crossings on the segment itself (`t ∈ [0, 1]`) count.
/// A zero-length segment never crosses.
pub fn intersect_line_ring(ellipse: &Ellipse, p1: Location, p2: Location) -> Vec<Location> {
    let Ellipse {
        center,
        semi_lon,
        semi_lat,
    } = *ellipse;

    // Unit-circle frame
    let x1 = (p1.longitude - center.longitude) / semi_lon;
    let y1 = (p1.latitude - center.latitude) / semi_lat;
    let x2 = (p2.longitude - center.longitude) / semi_lon;
    let y2 = (p2.latitude - center.latitude) / semi_lat;
    let (dx, dy) = (x2 - x1, y2 - y1);

    let a = dx * dx + dy * dy;
    let b = 2.0 * (x1 * dx + y1 * dy);
    let c = x1 * x1 + y1 * y1 - 1.0;

    if a == 0.0 || !a.is_finite() {
        return Vec::new();
    }

    let discriminant = b * b - 4.0 * a * c;
    let roots = if discriminant > 0.0 {
        let sqrt_d = discriminant.sqrt();
        vec![(-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a)]
    } else if discriminant == 0.0 {
        vec![-b / (2.0 * a)]
    } else {
        // Negative or NaN
        return Vec::new();
    };

    roots
        .into_iter()
        .filter(|t| (0.0..=1.0).contains(t))
        .map(|t| {
            Location::new(
                p1.latitude + (p2.latitude - p1.latitude) * t,
                p1.longitude + (p2.longitude - p1.longitude) * t,
            )
        })
        .collect()
}

/// All crossings of a polyline with the ring of `radius_miles` around `center`.
///
/// Segments are visited in polyline order and their crossings concatenated.
/// A vertex lying on the ring is reported once, not once per segment.
/// Polylines with fewer than two points produce nothing.
pub fn intersect_way_ring(polyline: &[Location], radius_miles: f64, center: Location) -> Vec<Location> {
    crossings_along(&Ellipse::ring(center, radius_miles), polyline)
}

fn crossings_along(ellipse: &Ellipse, polyline: &[Location]) -> Vec<Location> {
    let mut points: Vec<Location> = Vec::new();

    for pair in polyline.windows(2) {
        for point in intersect_line_ring(ellipse, pair[0], pair[1]) {
            // End of one segment, start of the next
            if points.last().is_some_and(|last| last.key() == point.key()) {
                continue;
            }
            points.push(point);
        }
    }

    points
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ellipse() -> Ellipse {
        Ellipse::ring(Location::new(30.616016, -96.337044), 0.5)
    }

    /// Point expressed in unit-circle coordinates of the ellipse.
    fn point(e: &Ellipse, x: f64, y: f64) -> Location {
        Location::new(
            e.center.latitude + y * e.semi_lat,
            e.center.longitude + x * e.semi_lon,
        )
    }

    proptest! {
        #[test]
        fn crossings_lie_on_boundary_and_segment(
            x1 in -3.0f64..3.0, y1 in -3.0f64..3.0,
            x2 in -3.0f64..3.0, y2 in -3.0f64..3.0,
        ) {
            let e = ellipse();
            let p1 = point(&e, x1, y1);
            let p2 = point(&e, x2, y2);

            let points = intersect_line_ring(&e, p1, p2);
            prop_assert!(points.len() <= 2);

            let (lo_lat, hi_lat) = (p1.latitude.min(p2.latitude), p1.latitude.max(p2.latitude));
            let (lo_lon, hi_lon) = (p1.longitude.min(p2.longitude), p1.longitude.max(p2.longitude));
            for p in &points {
                prop_assert!((e.normalized_distance_sq(p) - 1.0).abs() < 1e-6);
                prop_assert!(p.latitude >= lo_lat - 1e-12 && p.latitude <= hi_lat + 1e-12);
                prop_assert!(p.longitude >= lo_lon - 1e-12 && p.longitude <= hi_lon + 1e-12);
            }
        }

        #[test]
        fn segment_entirely_outside_on_one_side_never_crosses(
            x1 in 1.01f64..5.0, x2 in 1.01f64..5.0,
            y1 in -5.0f64..5.0, y2 in -5.0f64..5.0,
        ) {
            let e = ellipse();
            let points = intersect_line_ring(&e, point(&e, x1, y1), point(&e, x2, y2));
            prop_assert!(points.is_empty());
        }

        #[test]
        fn one_end_inside_one_outside_crosses_once(
            r_in in 0.0f64..0.95, r_out in 1.05f64..4.0,
            theta_in in 0.0f64..std::f64::consts::TAU,
            theta_out in 0.0f64..std::f64::consts::TAU,
        ) {
            let e = ellipse();
            let inside = point(&e, r_in * theta_in.cos(), r_in * theta_in.sin());
            let outside = point(&e, r_out * theta_out.cos(), r_out * theta_out.sin());

            prop_assert_eq!(intersect_line_ring(&e, inside, outside).len(), 1);
        }
    }
}
