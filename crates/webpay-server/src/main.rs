//! webpay HTTP Server
//!
//! Axum server for the web-payments checkout demo: shipping-option quoting,
//! payment authorization, and the payment-method manifest probe, plus static
//! serving of the demo page.

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{head, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webpay_providers::{
    ChargeProcessor, MockChargeProcessor, MockRateProvider, RateProvider, ShippoClient,
    StripeProcessor,
};

use crate::config::ServerConfig;
use crate::handlers::{buy, manifest_probe, ship};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();

    // Rate provider: real Shippo when a key is configured, mock otherwise
    let rates: Arc<dyn RateProvider> = match ShippoClient::from_env() {
        Ok(client) => {
            tracing::info!("✓ Shippo configured");
            Arc::new(client)
        }
        Err(e) => {
            tracing::warn!("⚠ Shippo not configured ({e}) - using mock rates");
            tracing::warn!("  Set SHIPPO_API_KEY in .env for live quotes");
            Arc::new(MockRateProvider::new())
        }
    };

    // Charge processor: real Stripe when a key is configured, mock otherwise
    let charges: Arc<dyn ChargeProcessor> = match StripeProcessor::from_env() {
        Ok(processor) => {
            tracing::info!("✓ Stripe configured");
            Arc::new(processor)
        }
        Err(e) => {
            tracing::warn!("⚠ Stripe not configured ({e}) - using mock charges");
            tracing::warn!("  Set STRIPE_SECRET_KEY in .env for live authorizations");
            Arc::new(MockChargeProcessor::new())
        }
    };

    let state = AppState {
        rates,
        charges,
        supported_method: Arc::from(config.supported_method.as_str()),
        manifest_url: Arc::from(config.manifest_url.as_str()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/ship", post(ship))
        .route("/buy", post(buy))
        .route("/test", head(manifest_probe))
        // Demo page and script
        .fallback_service(tower_http::services::ServeDir::new(&config.static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("webpay server running on http://{}", config.bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  POST /ship - Quote shipping options");
    tracing::info!("  POST /buy  - Authorize payment");
    tracing::info!("  HEAD /test - Payment-method manifest probe");

    axum::serve(listener, app).await?;

    Ok(())
}
