//! TomTom routing client error types.

/// Errors from the driving route provider.
#[derive(Debug, thiserror::Error)]
pub enum TomTomError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized: check TOMTOM_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by TomTom")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Batch returned a different number of items than were sent
    #[error("batch returned {got} items for {expected} queries")]
    BatchSize { expected: usize, got: usize },

    /// A single batch item failed
    #[error("batch item {index} failed with status {status}")]
    Item { index: usize, status: u16 },

    /// A batch item succeeded but contained no route
    #[error("batch item {index} has no route")]
    NoRoute { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TomTomError::BatchSize {
            expected: 4,
            got: 3,
        };
        assert_eq!(err.to_string(), "batch returned 3 items for 4 queries");

        let err = TomTomError::Item {
            index: 2,
            status: 400,
        };
        assert_eq!(err.to_string(), "batch item 2 failed with status 400");
    }
}
