//! Per-request ride planning.
//!
//! Geometry is fetched around the rider, candidates are generated ring by
//! ring, walking and driving routes are fetched concurrently, and the
//! paired legs are priced and ranked. The whole run is bounded by the
//! configured deadline; when it expires the in-flight provider calls are
//! dropped.

use std::slice;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{Location, Ride};
use crate::geo::bounding_box;

use super::assemble::{align_by_pickup, apply_prices, build_rides, rank_rides, ride_features};
use super::candidates::generate_candidates;
use super::config::PipelineConfig;
use super::error::PipelineError;
use super::provider::{GeometryProvider, PricingProvider, RouteMatrixProvider};

/// A rider asking for pickup options.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequest {
    pub source: Location,
    pub destination: Location,

    /// Keep at most this many rides. Zero or absent keeps all of them.
    #[serde(default)]
    pub max_points: Option<usize>,
}

impl RideRequest {
    pub fn new(source: Location, destination: Location) -> Self {
        Self {
            source,
            destination,
            max_points: None,
        }
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }
}

/// Ranked rides for one request.
#[derive(Debug, Clone)]
pub struct RidePlan {
    /// Cheapest first.
    pub rides: Vec<Ride>,

    /// Pickup candidates considered before ranking and truncation.
    pub candidate_count: usize,
}

impl RidePlan {
    pub fn empty() -> Self {
        Self {
            rides: Vec::new(),
            candidate_count: 0,
        }
    }
}

/// Ride planner over its four collaborators.
pub struct Pipeline<G, W, D, P> {
    geometry: G,
    walking: W,
    driving: D,
    pricing: P,
    config: PipelineConfig,
}

impl<G, W, D, P> Pipeline<G, W, D, P>
where
    G: GeometryProvider,
    W: RouteMatrixProvider,
    D: RouteMatrixProvider,
    P: PricingProvider,
{
    pub fn new(geometry: G, walking: W, driving: D, pricing: P, config: PipelineConfig) -> Self {
        Self {
            geometry,
            walking,
            driving,
            pricing,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Plan rides for `request`, pricing them as of `now`.
    pub async fn plan_rides(
        &self,
        request: &RideRequest,
        now: DateTime<Utc>,
    ) -> Result<RidePlan, PipelineError> {
        let deadline = self.config.deadline;

        match tokio::time::timeout(deadline, self.run(request, now)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(?deadline, "Ride planning timed out");
                Err(PipelineError::Timeout(deadline))
            }
        }
    }

    async fn run(&self, request: &RideRequest, now: DateTime<Utc>) -> Result<RidePlan, PipelineError> {
        let bbox = bounding_box(self.config.geometry_box_miles, request.source);
        let streets = self.geometry.street_geometry(bbox).await?;

        debug!(streets = streets.len(), "Street geometry ready");

        let candidates = generate_candidates(streets, request.source, &self.config.rings).await?;

        if candidates.is_empty() {
            info!("No pickup candidates near rider");
            return Ok(RidePlan::empty());
        }

        debug!(candidates = candidates.len(), "Candidates generated");

        // Walk: rider → each candidate. Drive: each candidate → destination.
        let (inbounds, outbounds) = tokio::try_join!(
            self.walking
                .route_matrix(slice::from_ref(&request.source), &candidates),
            self.driving
                .route_matrix(&candidates, slice::from_ref(&request.destination)),
        )?;

        let outbounds = align_by_pickup(&inbounds, &outbounds)?;
        let mut rides = build_rides(&inbounds, &outbounds)?;

        let features = ride_features(&rides, &outbounds, now);
        let prices = self.pricing.price(&features).await?;
        apply_prices(&mut rides, &prices)?;

        rank_rides(&mut rides);

        if let Some(max) = request.max_points.filter(|&max| max > 0) {
            rides.truncate(max);
        }

        info!(
            candidates = candidates.len(),
            rides = rides.len(),
            "Rides planned"
        );

        Ok(RidePlan {
            rides,
            candidate_count: candidates.len(),
        })
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
