//! TomTom batch routing HTTP client.

use std::time::Duration;

use futures::future::try_join_all;
use tracing::{debug, trace};

use crate::domain::{Location, RouteSummary};
use crate::pipeline::{PipelineError, RouteMatrixProvider};

use super::error::TomTomError;
use super::types::{BatchRequest, BatchResponse};

/// Default synchronous batch endpoint.
const DEFAULT_BASE_URL: &str = "https://api.tomtom.com/routing/1/batch/sync/json";

/// Synchronous batches are capped at 100 items.
const MAX_BATCH_ITEMS: usize = 100;

/// Configuration for the TomTom client.
#[derive(Debug, Clone)]
pub struct TomTomConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Batch endpoint URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TomTomConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom batch endpoint (for testing).
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

/// Traffic-aware driving route client.
#[derive(Debug, Clone)]
pub struct TomTomClient {
    http: reqwest::Client,
    config: TomTomConfig,
}

impl TomTomClient {
    pub fn new(config: TomTomConfig) -> Result<Self, TomTomError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Driving summary for every (source, destination) pair, row-major.
    ///
    /// Sources are split across as many batches as needed to stay under the
    /// item limit; batches are sent concurrently. Empty input makes no request.
    pub async fn routes(
        &self,
        sources: &[Location],
        destinations: &[Location],
    ) -> Result<Vec<RouteSummary>, TomTomError> {
        if sources.is_empty() || destinations.is_empty() {
            return Ok(Vec::new());
        }

        if destinations.len() > MAX_BATCH_ITEMS {
            return Err(TomTomError::Api {
                status: 0,
                message: format!(
                    "{} destinations exceed the batch limit of {}",
                    destinations.len(),
                    MAX_BATCH_ITEMS
                ),
            });
        }

        let rows_per_batch = MAX_BATCH_ITEMS / destinations.len();
        let batches = sources
            .chunks(rows_per_batch)
            .map(|chunk| self.batch(chunk, destinations));

        let summaries: Vec<RouteSummary> = try_join_all(batches)
            .await?
            .into_iter()
            .flatten()
            .collect();

        debug!(
            sources = sources.len(),
            destinations = destinations.len(),
            routes = summaries.len(),
            "TomTom routes complete"
        );

        Ok(summaries)
    }

    async fn batch(
        &self,
        sources: &[Location],
        destinations: &[Location],
    ) -> Result<Vec<RouteSummary>, TomTomError> {
        let request = BatchRequest::for_pairs(sources, destinations);

        let response = self
            .http
            .post(&self.config.base_url)
            .query(&[("key", &self.config.api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TomTomError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TomTomError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TomTomError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let batch: BatchResponse = serde_json::from_str(&body).map_err(|e| TomTomError::Json {
            message: e.to_string(),
        })?;

        trace!(items = request.len(), "TomTom batch response");

        batch.into_summaries(sources, destinations)
    }
}

impl RouteMatrixProvider for TomTomClient {
    async fn route_matrix(
        &self,
        sources: &[Location],
        destinations: &[Location],
    ) -> Result<Vec<RouteSummary>, PipelineError> {
        Ok(self.routes(sources, destinations).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = TomTomConfig::new("tt-key");
        assert_eq!(config.api_key, "tt-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = TomTomConfig::new("tt-key")
            .with_base_url("http://localhost:9000/batch")
            .with_timeout(3);
        assert_eq!(config.base_url, "http://localhost:9000/batch");
        assert_eq!(config.timeout_secs, 3);
    }

    #[tokio::test]
    async fn empty_input_skips_request() {
        let config = TomTomConfig::new("tt-key").with_base_url("http://127.0.0.1:1");
        let client = TomTomClient::new(config).unwrap();

        let dst = [Location::new(30.6, -96.3)];
        assert!(client.routes(&[], &dst).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn too_many_destinations_rejected_before_sending() {
        let config = TomTomConfig::new("tt-key").with_base_url("http://127.0.0.1:1");
        let client = TomTomClient::new(config).unwrap();

        let src = [Location::new(30.6, -96.3)];
        let destinations = vec![Location::new(30.7, -96.3); MAX_BATCH_ITEMS + 1];

        let err = client.routes(&src, &destinations).await.unwrap_err();
        assert!(matches!(err, TomTomError::Api { status: 0, .. }));
    }
}
