//! Geometry for candidate pickup points.
//!
//! Converts ring radii from miles to degrees, intersects street polylines
//! with each ring, and thins the resulting candidates by bearing.

mod conversion;
mod cull;
mod ring;

pub use conversion::{
    ECCENTRICITY, SEMI_MAJOR_AXIS_MILES, bounding_box, miles_to_deg_latitude,
    miles_to_deg_longitude,
};
pub use cull::{cull_by_angle, sector_of};
pub use ring::{Ellipse, intersect_line_ring, intersect_way_ring};
