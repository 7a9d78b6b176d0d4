//! Pricing service error types.

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
