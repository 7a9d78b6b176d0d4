//! Pricing service HTTP client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pipeline::{PipelineError, PricingProvider};

use super::error::PricingError;
use super::features::RideFeatures;

/// Configuration for the pricing client.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Prediction endpoint
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PricingConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 10,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Serialize)]
pub struct PricingRequest {
    pub data: Vec<[f64; 8]>,
}

#[derive(Debug, Deserialize)]
pub struct PricingResponse {
    #[serde(default)]
    pub prices: Vec<f64>,
}

/// Client for the price-prediction service.
#[derive(Debug, Clone)]
pub struct PricingClient {
    http: reqwest::Client,
    url: String,
}

impl PricingClient {
    pub fn new(config: PricingConfig) -> Result<Self, PricingError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// One predicted price per feature row, in row order.
    pub async fn predict(&self, features: &[RideFeatures]) -> Result<Vec<f64>, PricingError> {
        if features.is_empty() {
            return Ok(Vec::new());
        }

        let request = PricingRequest {
            data: features.iter().map(RideFeatures::to_row).collect(),
        };

        let response = self.http.post(&self.url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PricingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let prices: PricingResponse = serde_json::from_str(&body).map_err(|e| PricingError::Json {
            message: e.to_string(),
        })?;

        debug!(rows = features.len(), prices = prices.prices.len(), "Priced rides");

        Ok(prices.prices)
    }
}

impl PricingProvider for PricingClient {
    async fn price(&self, features: &[RideFeatures]) -> Result<Vec<f64>, PipelineError> {
        Ok(self.predict(features).await?)
    }
}
