//! Collaborator seams for the pipeline.
//!
//! Each external service the pipeline talks to sits behind one of these
//! traits so the orchestrator can run against mocks in tests and against
//! cached or fixture-backed implementations in production.

use std::future::Future;

use crate::domain::{BoundingBox, Location, RouteSummary, StreetPolyline};
use crate::pricing::RideFeatures;

use super::error::PipelineError;

/// Street polylines within a bounding box.
pub trait GeometryProvider: Send + Sync {
    fn street_geometry(
        &self,
        bbox: BoundingBox,
    ) -> impl Future<Output = Result<Vec<StreetPolyline>, PipelineError>> + Send;
}

/// Travel summaries between sets of points.
pub trait RouteMatrixProvider: Send + Sync {
    /// One summary per (source, destination) pair, row-major: every
    /// destination for `sources[0]` first, then `sources[1]`, and so on.
    fn route_matrix(
        &self,
        sources: &[Location],
        destinations: &[Location],
    ) -> impl Future<Output = Result<Vec<RouteSummary>, PipelineError>> + Send;
}

/// Price prediction.
pub trait PricingProvider: Send + Sync {
    /// One price per feature row, in row order.
    fn price(
        &self,
        features: &[RideFeatures],
    ) -> impl Future<Output = Result<Vec<f64>, PipelineError>> + Send;
}
