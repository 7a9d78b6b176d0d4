//! Pickup candidate generation.
//!
//! Each ring is intersected with every street and culled on its own
//! blocking-pool task. Ring results are joined in configuration order, so
//! the candidate list is ring 0's survivors, then ring 1's, and so on.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::trace;

use crate::domain::{Location, StreetPolyline};
use crate::geo::{cull_by_angle, intersect_way_ring};

use super::config::RingConfig;
use super::error::PipelineError;

/// Culled street crossings for one ring.
///
/// Crossings are gathered street by street in polyline order, then culled
/// by bearing around `center`.
pub fn ring_candidates(streets: &[StreetPolyline], center: Location, ring: &RingConfig) -> Vec<Location> {
    let crossings: Vec<Location> = streets
        .iter()
        .flat_map(|street| intersect_way_ring(street, ring.radius_miles, center))
        .collect();

    let kept = cull_by_angle(&crossings, center, ring.sectors, ring.per_sector);

    trace!(
        radius = ring.radius_miles,
        crossings = crossings.len(),
        kept = kept.len(),
        "Ring culled"
    );

    kept
}

/// Candidates for every ring, computed concurrently.
///
/// Points repeated across rings (a street vertex sitting exactly on two
/// rings, or duplicate ways) keep only their first occurrence.
pub async fn generate_candidates(
    streets: Vec<StreetPolyline>,
    center: Location,
    rings: &[RingConfig],
) -> Result<Vec<Location>, PipelineError> {
    let per_ring =
        for_each_ring(rings, move |ring| ring_candidates(&streets, center, ring)).await?;

    Ok(dedupe_candidates(per_ring.into_iter().flatten()))
}

/// Run `compute` for every ring at once, one blocking-pool task each.
///
/// Results come back in ring order. A panicked task fails the whole set.
async fn for_each_ring<F>(
    rings: &[RingConfig],
    compute: F,
) -> Result<Vec<Vec<Location>>, PipelineError>
where
    F: Fn(&RingConfig) -> Vec<Location> + Send + Sync + 'static,
{
    let compute = Arc::new(compute);

    let tasks = rings.iter().map(|ring| {
        let compute = Arc::clone(&compute);
        let ring = *ring;
        tokio::task::spawn_blocking(move || compute(&ring))
    });

    Ok(try_join_all(tasks).await?)
}

/// Drop points whose 6-decimal coordinate was already seen.
pub fn dedupe_candidates(candidates: impl IntoIterator<Item = Location>) -> Vec<Location> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.key()))
        .collect()
}
