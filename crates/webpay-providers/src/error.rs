//! Provider Error Types

use thiserror::Error;

/// Result type alias for provider calls
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors from the external rate provider and charge processor.
///
/// The endpoints collapse all of these into the uniform fail envelope; the
/// variants exist for operator-visible logging only.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Provider answered with a non-success status or an error body
    #[error("Provider API error: {0}")]
    Api(String),

    /// Charge processor rejected the authorization
    #[error("Charge declined: {0}")]
    Declined(String),

    /// Outbound call exceeded its bounded wait
    #[error("Provider call timed out after {0}s")]
    Timeout(u64),

    /// Funding token was not a valid processor token id
    #[error("Invalid funding token: {0}")]
    InvalidToken(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error, including a response body of the wrong shape
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
