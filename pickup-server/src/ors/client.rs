//! OpenRouteService HTTP client.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::domain::{Location, RouteSummary};
use crate::pipeline::{PipelineError, RouteMatrixProvider};

use super::error::OrsError;
use super::types::{MatrixRequest, MatrixResponse};

/// Default base URL for the ORS API.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Routing profile for pedestrians.
const WALKING_PROFILE: &str = "foot-walking";

/// Configuration for the ORS client.
#[derive(Debug, Clone)]
pub struct OrsConfig {
    /// API key sent in the Authorization header
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Routing profile
    pub profile: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OrsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: WALKING_PROFILE.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
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

/// Walking route-matrix client.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    url: String,
}

impl OrsClient {
    pub fn new(config: OrsConfig) -> Result<Self, OrsError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| OrsError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(AUTHORIZATION, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: format!("{}/v2/matrix/{}", config.base_url, config.profile),
        })
    }

    /// Walking time and distance for every (source, destination) pair.
    ///
    /// Results are row-major: all destinations for `sources[0]`, then
    /// `sources[1]`, and so on. Empty input makes no request.
    pub async fn matrix(
        &self,
        sources: &[Location],
        destinations: &[Location],
    ) -> Result<Vec<RouteSummary>, OrsError> {
        if sources.is_empty() || destinations.is_empty() {
            return Ok(Vec::new());
        }

        let request = MatrixRequest::new(sources, destinations);

        let response = self.http.post(&self.url).json(&request).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(OrsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OrsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OrsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let matrix: MatrixResponse = serde_json::from_str(&body).map_err(|e| OrsError::Json {
            message: e.to_string(),
        })?;

        let summaries = matrix.into_summaries(sources, destinations)?;

        debug!(
            sources = sources.len(),
            destinations = destinations.len(),
            routes = summaries.len(),
            "ORS matrix complete"
        );

        Ok(summaries)
    }
}

impl RouteMatrixProvider for OrsClient {
    async fn route_matrix(
        &self,
        sources: &[Location],
        destinations: &[Location],
    ) -> Result<Vec<RouteSummary>, PipelineError> {
        Ok(self.matrix(sources, destinations).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OrsConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.profile, "foot-walking");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_builds_matrix_url() {
        let config = OrsConfig::new("test-key").with_base_url("http://localhost:8080");
        let client = OrsClient::new(config).unwrap();
        assert_eq!(client.url, "http://localhost:8080/v2/matrix/foot-walking");
    }

    #[test]
    fn invalid_api_key_rejected() {
        let result = OrsClient::new(OrsConfig::new("bad\nkey"));
        assert!(matches!(result, Err(OrsError::Api { .. })));
    }

    #[tokio::test]
    async fn empty_input_skips_request() {
        // Unroutable base URL: any request would fail
        let config = OrsConfig::new("test-key").with_base_url("http://127.0.0.1:1");
        let client = OrsClient::new(config).unwrap();

        let origin = [Location::new(30.6, -96.3)];
        assert!(client.matrix(&[], &origin).await.unwrap().is_empty());
        assert!(client.matrix(&origin, &[]).await.unwrap().is_empty());
    }
}
