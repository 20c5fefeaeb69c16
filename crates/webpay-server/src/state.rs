//! Application State

use std::sync::Arc;

use webpay_providers::{ChargeProcessor, RateProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Shipping-rate provider (Shippo, or mock when unconfigured)
    pub rates: Arc<dyn RateProvider>,

    /// Charge processor (Stripe, or mock when unconfigured)
    pub charges: Arc<dyn ChargeProcessor>,

    /// The only payment method /buy accepts
    pub supported_method: Arc<str>,

    /// Manifest URL advertised by the HEAD /test probe
    pub manifest_url: Arc<str>,
}
