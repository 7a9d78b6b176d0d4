//! Data transfer objects for the HTTP API.

use serde::Serialize;

use crate::domain::Ride;
use crate::pipeline::RidePlan;

/// Response body for `POST /rides`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RidesResponse {
    /// Cheapest first
    pub rides: Vec<Ride>,

    /// Pickup candidates considered
    pub candidate_count: usize,
}

impl From<RidePlan> for RidesResponse {
    fn from(plan: RidePlan) -> Self {
        Self {
            rides: plan.rides,
            candidate_count: plan.candidate_count,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
