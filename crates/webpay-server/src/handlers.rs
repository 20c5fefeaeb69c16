//! HTTP Handlers
//!
//! All three endpoints answer HTTP 200; the JSON envelope carries the
//! outcome. That is the compatibility contract of the original demo, so a
//! provider failure is a `fail` envelope, never a 5xx.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json},
};

use webpay_core::{Envelope, InstrumentPayload, ShippingAddress, normalize, select_cheapest, validate_instrument};

use crate::state::AppState;

/// `POST /ship` — quote shipping options for the submitted address.
///
/// Normalizes the address, asks the rate provider for quotes, and returns
/// the options with the cheapest one pre-selected.
pub async fn ship(
    State(state): State<AppState>,
    Json(address): Json<ShippingAddress>,
) -> Json<Envelope> {
    let normalized = normalize(&address);

    match state.rates.quote(&address, &normalized).await {
        Ok(quotes) => Json(Envelope::calculated(select_cheapest(quotes))),
        Err(e) => {
            tracing::error!(provider = state.rates.name(), error = %e, "rate quote failed");
            Json(Envelope::shipping_failed())
        }
    }
}

/// `POST /buy` — authorize the approved payment instrument.
///
/// Validation failures and processor failures share the "Invalid request"
/// answer; only the server logs tell them apart.
pub async fn buy(
    State(state): State<AppState>,
    Json(payload): Json<InstrumentPayload>,
) -> Json<Envelope> {
    let source_token = match validate_instrument(&payload, &state.supported_method) {
        Ok(token) => token,
        Err(e) => {
            // The error names the failed check, never the token itself.
            tracing::warn!(error = %e, "instrument rejected");
            return Json(Envelope::invalid_request());
        }
    };

    match state.charges.authorize(&source_token).await {
        Ok(confirmation) => {
            tracing::info!(
                processor = state.charges.name(),
                charge = %confirmation.id,
                "payment authorized"
            );
            Json(Envelope::payment_authorized())
        }
        Err(e) => {
            tracing::error!(processor = state.charges.name(), error = %e, "authorization failed");
            Json(Envelope::invalid_request())
        }
    }
}

/// `HEAD /test` — advertise the payment-method manifest.
///
/// Empty body; the link-relation header is the whole payload.
pub async fn manifest_probe(State(state): State<AppState>) -> impl IntoResponse {
    let link = format!("<{}>; rel=\"payment-method-manifest\"", state.manifest_url);
    (StatusCode::OK, [(header::LINK, link)])
}
