//! Street geometry from OpenStreetMap.
//!
//! Queries the Overpass API for drivable street ways inside a bounding box
//! around the rider. Each way comes back with its node coordinates inline
//! (`out geom`), so no separate node lookup is needed.

mod client;
mod error;
mod mock;
mod source;
mod types;

pub use client::{OverpassClient, OverpassConfig, parse_streets};
pub use error::OverpassError;
pub use mock::MockStreetGeometry;
pub use source::StreetSource;
pub use types::{HIGHWAY_TYPES, OverpassResponse, street_query};
