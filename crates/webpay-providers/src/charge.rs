//! Charge Processor
//!
//! `ChargeProcessor` abstracts the card-payment processor; `StripeProcessor`
//! implements it with an authorization-only charge (funds held, never
//! captured) against the decoded funding token.

use async_trait::async_trait;
use std::time::Duration;
use stripe::{Charge, ChargeSourceParams, Client, CreateCharge, Currency, TokenId};

use crate::error::{ProviderError, Result};

/// Card-payment processor (Strategy pattern).
#[async_trait]
pub trait ChargeProcessor: Send + Sync {
    /// Place an authorization-only hold against `source_token`, the id
    /// decoded from the instrument's funding token.
    async fn authorize(&self, source_token: &str) -> Result<ChargeConfirmation>;

    /// Processor name, for logs
    fn name(&self) -> &str;
}

/// Confirmation of a successful authorization.
#[derive(Clone, Debug)]
pub struct ChargeConfirmation {
    /// Processor's charge id
    pub id: String,

    /// Amount held, in minor units
    pub amount_minor: i64,
}

/// Deployment constants for the demo charge: USD $0.50, never captured.
#[derive(Clone, Debug)]
pub struct ChargeConfig {
    /// Amount in minor units
    pub amount_minor: i64,

    pub description: String,

    /// Bound on the outbound processor call
    pub timeout_secs: u64,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            amount_minor: 50,
            description: "Web payments demo".into(),
            timeout_secs: 30,
        }
    }
}

/// Stripe charge client
pub struct StripeProcessor {
    client: Client,
    config: ChargeConfig,
}

impl StripeProcessor {
    /// Create a processor with the given secret key and charge constants.
    pub fn new(secret_key: &str, config: ChargeConfig) -> Self {
        Self {
            client: Client::new(secret_key),
            config,
        }
    }

    /// Create from the `STRIPE_SECRET_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| ProviderError::Config("STRIPE_SECRET_KEY not set".into()))?;
        Ok(Self::new(&secret_key, ChargeConfig::default()))
    }
}

#[async_trait]
impl ChargeProcessor for StripeProcessor {
    async fn authorize(&self, source_token: &str) -> Result<ChargeConfirmation> {
        let token: TokenId = source_token
            .parse()
            .map_err(|_| ProviderError::InvalidToken("not a processor token id".into()))?;

        let mut params = CreateCharge::new();
        params.amount = Some(self.config.amount_minor);
        params.currency = Some(Currency::USD);
        params.capture = Some(false);
        params.description = Some(&self.config.description);
        params.source = Some(ChargeSourceParams::Token(token));

        let charge = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            Charge::create(&self.client, params),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.config.timeout_secs))?
        .map_err(|e| ProviderError::Declined(e.to_string()))?;

        Ok(ChargeConfirmation {
            id: charge.id.to_string(),
            amount_minor: charge.amount,
        })
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}
