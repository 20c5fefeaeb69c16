//! Error Types

use thiserror::Error;

/// Result type alias for checkout operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Instrument validation failures.
///
/// Every variant collapses into the same "Invalid request" envelope; the
/// distinction exists for server logs only. None of the messages carry the
/// token text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CheckoutError {
    /// A required payload field was absent
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The method is not the one this deployment supports
    #[error("Unsupported payment method: {0}")]
    UnsupportedMethod(String),

    /// The funding token did not decode as JSON
    #[error("Funding token is not valid JSON")]
    TokenNotJson,

    /// The decoded funding token has no `id`
    #[error("Funding token has no id")]
    TokenMissingId,
}
