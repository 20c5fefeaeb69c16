//! Response Envelope
//!
//! The uniform success/fail contract both endpoints return. Transport status
//! is always HTTP 200; the envelope carries the outcome. This is a
//! compatibility contract with the original demo, not a style choice.

use serde::{Deserialize, Serialize};

use crate::rates::ShippingOption;

/// Envelope outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// Uniform response envelope for the shipping and payment endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status: Status,

    /// Human-readable outcome
    pub message: String,

    /// Present only on successful shipping calculations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_options: Option<Vec<ShippingOption>>,
}

impl Envelope {
    /// Successful shipping calculation with its option list.
    pub fn calculated(options: Vec<ShippingOption>) -> Self {
        Self {
            status: Status::Success,
            message: "Calculated shipping options".into(),
            shipping_options: Some(options),
        }
    }

    /// Failed shipping calculation.
    pub fn shipping_failed() -> Self {
        Self::fail("Error calculating shipping options")
    }

    /// Successful payment authorization.
    pub fn payment_authorized() -> Self {
        Self {
            status: Status::Success,
            message: "Payment authorized".into(),
            shipping_options: None,
        }
    }

    /// Rejected payment request. Validation failures and processor failures
    /// share this answer; the caller cannot tell them apart.
    pub fn invalid_request() -> Self {
        Self::fail("Invalid request")
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: message.into(),
            shipping_options: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
