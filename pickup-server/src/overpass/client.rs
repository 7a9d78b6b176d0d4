//! Overpass HTTP client.

use std::time::Duration;

use tracing::debug;

use crate::domain::{BoundingBox, StreetPolyline};
use crate::pipeline::{GeometryProvider, PipelineError};

use super::error::OverpassError;
use super::types::{OverpassResponse, street_query};

/// Default public Overpass interpreter.
const DEFAULT_BASE_URL: &str = "https://overpass-api.de/api/interpreter";

/// Configuration for the Overpass client.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OverpassConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom interpreter URL (mirrors or tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for street geometry from OpenStreetMap via Overpass.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    base_url: String,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, OverpassError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch every street way inside `bbox`.
    pub async fn fetch_streets(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<StreetPolyline>, OverpassError> {
        let query = street_query(bbox);

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OverpassError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OverpassError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let polylines = parse_streets(&body)?;

        debug!(streets = polylines.len(), "Fetched street geometry");

        Ok(polylines)
    }
}

/// Parse an Overpass `out geom` body into polylines.
pub fn parse_streets(body: &str) -> Result<Vec<StreetPolyline>, OverpassError> {
    let response: OverpassResponse =
        serde_json::from_str(body).map_err(|e| OverpassError::Json {
            message: e.to_string(),
        })?;

    Ok(response.into_polylines())
}

impl GeometryProvider for OverpassClient {
    async fn street_geometry(
        &self,
        bbox: BoundingBox,
    ) -> Result<Vec<StreetPolyline>, PipelineError> {
        Ok(self.fetch_streets(&bbox).await?)
    }
}
