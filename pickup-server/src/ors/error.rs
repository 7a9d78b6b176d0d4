//! OpenRouteService client error types.

/// Errors from the walking route-matrix provider.
#[derive(Debug, thiserror::Error)]
pub enum OrsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized: check ORS_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by OpenRouteService")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Matrix dimensions don't match the request
    #[error("matrix shape mismatch: expected {expected_rows}x{expected_cols}, got {message}")]
    Shape {
        expected_rows: usize,
        expected_cols: usize,
        message: String,
    },

    /// No walking route between a source and destination
    #[error("no walking route from source {source_index} to destination {destination_index}")]
    Unroutable {
        source_index: usize,
        destination_index: usize,
    },
}
