//! TomTom driving routes.
//!
//! Driving legs go through TomTom's synchronous batch endpoint: one
//! `calculateRoute` query per pickup point, all sent in a single request.
//! Routes are traffic-aware and report historic and no-traffic travel
//! times alongside the live estimate.

mod client;
mod error;
mod types;

pub use client::{TomTomClient, TomTomConfig};
pub use error::TomTomError;
pub use types::{BatchRequest, BatchResponse, calculate_route_query};
