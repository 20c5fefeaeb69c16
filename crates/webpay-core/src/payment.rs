//! Payment Instrument Validation
//!
//! Validates the tokenized instrument the browser hands back after the user
//! approves payment, and extracts the funding-token id forwarded to the
//! charge processor. The raw token is transient: it is never persisted and
//! never logged.

use serde::Deserialize;

use crate::error::{CheckoutError, Result};

/// Instrument payload posted by the client after payment approval.
///
/// Every field is optional on the wire; a missing field fails validation,
/// not deserialization, so the endpoint can answer with the uniform envelope
/// instead of a transport error.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstrumentPayload {
    pub method_name: Option<String>,
    pub details: Option<InstrumentDetails>,
}

/// Method-specific details carrying the gateway token.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstrumentDetails {
    /// JSON-encoded string containing `{"id": ...}`
    pub payment_method_token: Option<String>,
}

#[derive(Deserialize)]
struct DecodedToken {
    #[serde(default)]
    id: String,
}

/// Validate an instrument payload against the supported method and decode
/// its funding token.
///
/// Checks run fail-fast in order: method name matches, details present,
/// token string present, token parses as JSON with a non-empty `id`. On
/// success returns the decoded id, the only part of the token that travels
/// further.
pub fn validate_instrument(payload: &InstrumentPayload, supported_method: &str) -> Result<String> {
    let method = payload
        .method_name
        .as_deref()
        .ok_or(CheckoutError::MissingField("methodName"))?;
    if method != supported_method {
        return Err(CheckoutError::UnsupportedMethod(method.to_string()));
    }

    let token = payload
        .details
        .as_ref()
        .and_then(|d| d.payment_method_token.as_deref())
        .ok_or(CheckoutError::MissingField("paymentMethodToken"))?;

    let decoded: DecodedToken =
        serde_json::from_str(token).map_err(|_| CheckoutError::TokenNotJson)?;

    if decoded.id.is_empty() {
        return Err(CheckoutError::TokenMissingId);
    }

    Ok(decoded.id)
}
