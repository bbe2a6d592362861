//! Error types for the game API client.

use thiserror::Error;

/// Errors that can occur while talking to the game API.
///
/// The typed [`GameApi`](crate::GameApi) wrappers never surface these; they
/// log them and return an empty result instead.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Still rate limited after the configured number of attempts
    #[error("rate limited on {url} after {attempts} attempts")]
    RateLimited {
        /// Requested URL
        url: String,
        /// Attempts made, first try included
        attempts: u32,
    },

    /// Any status other than 200 or 429
    #[error("unexpected status {status} from {url}: {message}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Truncated response body
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("failed to parse response from {url}: {message}")]
    Parse {
        /// Requested URL
        url: String,
        /// Decoder message
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
