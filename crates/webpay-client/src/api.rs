//! Checkout API Client
//!
//! `CheckoutApi` is the client's view of the two server endpoints. Both
//! return the uniform envelope over HTTP 200; a transport failure surfaces
//! as an error and the session treats it as terminal for that operation.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use webpay_core::{Envelope, ShippingAddress};

use crate::error::Result;

/// Instrument payload posted to `/buy` after the user approves payment.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentSubmission {
    pub method_name: String,
    pub details: SubmissionDetails,
}

/// Method-specific details carrying the gateway token.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetails {
    /// JSON-encoded token string, passed through untouched
    pub payment_method_token: String,
}

/// The checkout server's endpoints.
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    /// `POST /ship` with the current shipping address.
    async fn ship(&self, address: &ShippingAddress) -> Result<Envelope>;

    /// `POST /buy` with the approved instrument.
    async fn buy(&self, instrument: &InstrumentSubmission) -> Result<Envelope>;
}

/// reqwest-backed implementation against a running checkout server.
pub struct HttpCheckoutApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCheckoutApi {
    /// Create a client for the server at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CheckoutApi for HttpCheckoutApi {
    async fn ship(&self, address: &ShippingAddress) -> Result<Envelope> {
        let envelope = self
            .client
            .post(format!("{}/ship", self.base_url))
            .json(address)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope)
    }

    async fn buy(&self, instrument: &InstrumentSubmission) -> Result<Envelope> {
        let envelope = self
            .client
            .post(format!("{}/buy", self.base_url))
            .json(instrument)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_wire_shape() {
        let submission = InstrumentSubmission {
            method_name: "https://android.com/pay".into(),
            details: SubmissionDetails {
                payment_method_token: r#"{"id":"tok_123"}"#.into(),
            },
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["methodName"], "https://android.com/pay");
        assert_eq!(json["details"]["paymentMethodToken"], r#"{"id":"tok_123"}"#);
    }
}
