//! Pickup-point ride planning pipeline.
//!
//! Streets near the rider are intersected with concentric rings to find
//! pickup candidates, each candidate gets a walk leg from the rider and a
//! drive leg to the destination, and the resulting rides are priced and
//! ranked cheapest first.

mod assemble;
mod candidates;
mod config;
mod error;
mod orchestrator;
mod provider;

pub use assemble::{
    align_by_pickup, apply_prices, build_ride, build_rides, rank_rides, ride_features,
};
pub use candidates::{dedupe_candidates, generate_candidates, ring_candidates};
pub use config::{PipelineConfig, RingConfig};
pub use error::PipelineError;
pub use orchestrator::{Pipeline, RidePlan, RideRequest};
pub use provider::{GeometryProvider, PricingProvider, RouteMatrixProvider};
