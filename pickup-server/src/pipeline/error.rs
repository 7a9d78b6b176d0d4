//! Request-level pipeline errors.

use std::time::Duration;

use crate::domain::CoordKey;
use crate::ors::OrsError;
use crate::overpass::OverpassError;
use crate::pricing::PricingError;
use crate::tomtom::TomTomError;

/// Why a ride request failed.
///
/// Provider failures are fatal for the request they occur in but never for
/// the process; they surface here and the caller decides what to do.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("street geometry: {0}")]
    Geometry(#[from] OverpassError),

    #[error("walking routes: {0}")]
    Walking(#[from] OrsError),

    #[error("driving routes: {0}")]
    Driving(#[from] TomTomError),

    #[error("pricing: {0}")]
    Pricing(#[from] PricingError),

    /// Inbound and outbound summaries can't be paired by position.
    #[error("cannot pair {inbound} inbound routes with {outbound} outbound routes")]
    Misaligned { inbound: usize, outbound: usize },

    /// A route matrix came back with the wrong number of cells.
    #[error("route matrix returned {got} routes for {expected} pairs")]
    MatrixSize { expected: usize, got: usize },

    /// A pickup point has a walk leg but no drive leg, or vice versa.
    #[error("no matching route for pickup point {pickup}")]
    MissingRoute { pickup: CoordKey },

    #[error("pricing returned {got} prices for {expected} rides")]
    PriceCount { expected: usize, got: usize },

    #[error("ride planning exceeded {0:?}")]
    Timeout(Duration),

    /// A candidate-generation worker panicked or was cancelled.
    #[error("candidate task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(err: tokio::task::JoinError) -> Self {
        PipelineError::Task(err.to_string())
    }
}
