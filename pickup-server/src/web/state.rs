//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CachedRouteMatrix, MemoryRouteCache};
use crate::ors::OrsClient;
use crate::overpass::StreetSource;
use crate::pipeline::Pipeline;
use crate::pricing::PricingClient;
use crate::tomtom::TomTomClient;

/// Walking routes from ORS behind the route cache.
pub type WalkingRoutes = CachedRouteMatrix<OrsClient, MemoryRouteCache>;

/// Driving routes from TomTom behind the route cache.
pub type DrivingRoutes = CachedRouteMatrix<TomTomClient, MemoryRouteCache>;

/// The pipeline as wired in production.
pub type LivePipeline = Pipeline<StreetSource, WalkingRoutes, DrivingRoutes, PricingClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Ride planner
    pub pipeline: Arc<LivePipeline>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(pipeline: LivePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
