//! Ride price prediction.
//!
//! Rides are priced by an external model service. Each ride becomes one
//! eight-column feature row; the service answers with one price per row.

mod client;
mod error;
mod features;

pub use client::{PricingClient, PricingConfig, PricingRequest, PricingResponse};
pub use error::PricingError;
pub use features::RideFeatures;
