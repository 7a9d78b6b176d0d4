//! Overpass client error types.

/// Errors from fetching street geometry.
#[derive(Debug, thiserror::Error)]
pub enum OverpassError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Overpass is overloaded and refused the query
    #[error("rate limited by Overpass")]
    RateLimited,

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Fixture file could not be read
    #[error("fixture error: {message}")]
    Fixture { message: String },
}
