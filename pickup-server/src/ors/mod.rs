//! OpenRouteService walking route matrix.
//!
//! Walking times are taken from ORS's `foot-walking` profile. ORS has no
//! traffic model, so summaries from here never carry traffic times.

mod client;
mod error;
mod types;

pub use client::{OrsClient, OrsConfig};
pub use error::OrsError;
pub use types::{MatrixRequest, MatrixResponse};
