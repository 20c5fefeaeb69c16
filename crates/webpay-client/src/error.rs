//! Client Flow Error Types

use thiserror::Error;

/// Result type alias for the checkout flow
pub type Result<T> = std::result::Result<T, FlowError>;

/// Client checkout flow errors
#[derive(Error, Debug)]
pub enum FlowError {
    /// Payment surface failed to deliver an event or accept an update
    #[error("Payment surface error: {0}")]
    Surface(String),

    /// The session timed out but the surface refused to abort, e.g. because
    /// the user is mid-payment. Must be reported, never swallowed.
    #[error("Session timed out but could not abort: {0}")]
    AbortBlocked(String),

    /// Network error talking to the checkout server
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
