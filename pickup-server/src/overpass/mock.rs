//! Fixture-backed street geometry for running without Overpass.
//!
//! Loads a saved Overpass `out geom` response once and serves the same
//! streets for every request, whatever bounding box is asked for.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{BoundingBox, StreetPolyline};
use crate::pipeline::{GeometryProvider, PipelineError};

use super::client::parse_streets;
use super::error::OverpassError;

/// Street geometry served from a JSON fixture.
#[derive(Debug, Clone)]
pub struct MockStreetGeometry {
    streets: Arc<Vec<StreetPolyline>>,
}

impl MockStreetGeometry {
    /// Load an Overpass JSON response from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OverpassError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| OverpassError::Fixture {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let streets = parse_streets(&json)?;
        if streets.is_empty() {
            return Err(OverpassError::Fixture {
                message: format!("no street elements in {}", path.display()),
            });
        }

        Ok(Self::from_streets(streets))
    }

    /// Serve the given polylines directly.
    pub fn from_streets(streets: Vec<StreetPolyline>) -> Self {
        Self {
            streets: Arc::new(streets),
        }
    }

    pub fn len(&self) -> usize {
        self.streets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streets.is_empty()
    }
}

impl GeometryProvider for MockStreetGeometry {
    async fn street_geometry(
        &self,
        _bbox: BoundingBox,
    ) -> Result<Vec<StreetPolyline>, PipelineError> {
        Ok(self.streets.as_ref().clone())
    }
}
