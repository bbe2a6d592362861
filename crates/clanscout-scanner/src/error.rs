use thiserror::Error;

/// Errors raised before a search starts.
///
/// Per-call API failures never surface here; they are downgraded to "no
/// data" inside the stages.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Criteria that cannot describe a meaningful search
    #[error("invalid search criteria for {field}: {reason}")]
    InvalidCriteria {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// The scanner was built with an empty term universe
    #[error("no search terms configured")]
    NoSearchTerms,
}

/// Result type alias for scanner operations.
pub type Result<T> = std::result::Result<T, ScanError>;
