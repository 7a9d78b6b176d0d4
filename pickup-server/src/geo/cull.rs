//! Angular culling of candidate points.
//!
//! Candidates are bucketed into `sectors` equal slices of bearing around
//! the center and each slice keeps at most `per_sector` points.
//!
//! Admission within a slice is first-come: the earliest points in input
//! order win, regardless of how well they are spread inside the slice.
//! This is a known-weak heuristic kept for compatibility; a spread-aware
//! selection would need a different ordering upstream.

use std::f64::consts::TAU;

use crate::domain::Location;

/// Sector index of `point` relative to `center`, in `[0, sectors)`.
///
/// Angle zero is due east (positive longitude) and increases
/// counter-clockwise towards north. `sectors` must be non-zero.
pub fn sector_of(point: &Location, center: &Location, sectors: usize) -> usize {
    let mut angle = (point.latitude - center.latitude).atan2(point.longitude - center.longitude);
    if angle < 0.0 {
        angle += TAU;
    }

    let width = TAU / sectors as f64;
    // NaN angles cast to 0; angles rounding up to TAU wrap back to 0
    ((angle / width) as usize) % sectors
}

/// Keep at most `per_sector` points in each of `sectors` angular slices.
///
/// The result is grouped by sector in ascending index order, and within a
/// sector keeps input order. Its length never exceeds `sectors × per_sector`
/// and no input point appears twice. Zero sectors or a zero cap yields an
/// empty result.
pub fn cull_by_angle(
    points: &[Location],
    center: Location,
    sectors: usize,
    per_sector: usize,
) -> Vec<Location> {
    if points.is_empty() || sectors == 0 || per_sector == 0 {
        return Vec::new();
    }

    let mut buckets: Vec<Vec<Location>> = vec![Vec::new(); sectors];

    for point in points {
        let bucket = &mut buckets[sector_of(point, &center, sectors)];
        if bucket.len() < per_sector {
            bucket.push(*point);
        }
    }

    buckets.into_iter().flatten().collect()
}
