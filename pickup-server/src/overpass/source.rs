//! Runtime choice between live Overpass and a saved fixture.

use crate::domain::{BoundingBox, StreetPolyline};
use crate::pipeline::{GeometryProvider, PipelineError};

use super::client::OverpassClient;
use super::mock::MockStreetGeometry;

/// Street geometry from either source, picked at startup.
#[derive(Debug, Clone)]
pub enum StreetSource {
    Live(OverpassClient),
    Fixture(MockStreetGeometry),
}

impl StreetSource {
    pub fn name(&self) -> &'static str {
        match self {
            StreetSource::Live(_) => "overpass",
            StreetSource::Fixture(_) => "fixture",
        }
    }
}

impl GeometryProvider for StreetSource {
    async fn street_geometry(
        &self,
        bbox: BoundingBox,
    ) -> Result<Vec<StreetPolyline>, PipelineError> {
        match self {
            StreetSource::Live(client) => client.street_geometry(bbox).await,
            StreetSource::Fixture(fixture) => fixture.street_geometry(bbox).await,
        }
    }
}
