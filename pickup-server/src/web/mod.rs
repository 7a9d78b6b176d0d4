//! Web layer for the pickup planner.
//!
//! Provides the HTTP endpoint that turns a rider's location and
//! destination into ranked pickup rides.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, DrivingRoutes, LivePipeline, WalkingRoutes};
