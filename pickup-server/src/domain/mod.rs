//! Domain types for pickup-point selection.
//!
//! Everything here is created fresh per request and discarded once the
//! response has been built.

mod location;
mod ride;
mod route;

pub use location::{BoundingBox, CoordKey, InvalidLocation, Location, StreetPolyline};
pub use ride::Ride;
pub use route::{MILES_PER_METER, RouteSummary, TrafficTimes, meters_to_miles};
