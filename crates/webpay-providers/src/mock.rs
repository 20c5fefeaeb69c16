//! Mock Providers
//!
//! For tests and for running the demo without API keys. The rate mock quotes
//! a fixed carrier pair; the charge mock authorizes anything that looks like
//! a token.

use async_trait::async_trait;
use std::sync::Mutex;

use webpay_core::{NormalizedAddress, RateQuote, ShippingAddress};

use crate::charge::{ChargeConfirmation, ChargeProcessor};
use crate::error::{ProviderError, Result};
use crate::rates::RateProvider;

/// Mock rate provider with static quotes.
pub struct MockRateProvider {
    quotes: Vec<RateQuote>,
    fail: bool,
}

impl Default for MockRateProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRateProvider {
    /// Two fixed quotes, ground cheaper than express.
    pub fn new() -> Self {
        Self {
            quotes: vec![
                RateQuote {
                    object_id: "mock_express".into(),
                    provider: "FedEx".into(),
                    servicelevel_name: "2 Day".into(),
                    currency: "USD".into(),
                    amount: "12.50".into(),
                },
                RateQuote {
                    object_id: "mock_ground".into(),
                    provider: "USPS".into(),
                    servicelevel_name: "Priority Mail".into(),
                    currency: "USD".into(),
                    amount: "8.00".into(),
                },
            ],
            fail: false,
        }
    }

    /// Quote exactly these rates.
    pub fn with_quotes(quotes: Vec<RateQuote>) -> Self {
        Self { quotes, fail: false }
    }

    /// Fail every quote call (provider-error path).
    pub fn failing() -> Self {
        Self {
            quotes: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl RateProvider for MockRateProvider {
    async fn quote(
        &self,
        _address: &ShippingAddress,
        _normalized: &NormalizedAddress,
    ) -> Result<Vec<RateQuote>> {
        if self.fail {
            return Err(ProviderError::Api("mock rate provider failure".into()));
        }
        Ok(self.quotes.clone())
    }

    fn name(&self) -> &str {
        "MockRates"
    }
}

/// Mock charge processor that records the tokens it was asked to authorize.
pub struct MockChargeProcessor {
    fail: bool,
    authorized: Mutex<Vec<String>>,
}

impl Default for MockChargeProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChargeProcessor {
    pub fn new() -> Self {
        Self {
            fail: false,
            authorized: Mutex::new(Vec::new()),
        }
    }

    /// Decline every authorization (processor-error path).
    pub fn declining() -> Self {
        Self {
            fail: true,
            authorized: Mutex::new(Vec::new()),
        }
    }

    /// Tokens authorized so far.
    pub fn authorized(&self) -> Vec<String> {
        self.authorized.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChargeProcessor for MockChargeProcessor {
    async fn authorize(&self, source_token: &str) -> Result<ChargeConfirmation> {
        if self.fail {
            return Err(ProviderError::Declined("mock decline".into()));
        }
        if let Ok(mut authorized) = self.authorized.lock() {
            authorized.push(source_token.to_string());
        }
        Ok(ChargeConfirmation {
            id: format!("ch_mock_{source_token}"),
            amount_minor: 50,
        })
    }

    fn name(&self) -> &str {
        "MockCharges"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webpay_core::normalize;

    #[tokio::test]
    async fn test_mock_rates_quote_cheapest_last() {
        let provider = MockRateProvider::new();
        let address = ShippingAddress::default();
        let quotes = provider.quote(&address, &normalize(&address)).await.unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].object_id, "mock_ground");
    }

    #[tokio::test]
    async fn test_failing_mock_rates() {
        let provider = MockRateProvider::failing();
        let address = ShippingAddress::default();
        assert!(provider.quote(&address, &normalize(&address)).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_charges_record_tokens() {
        let processor = MockChargeProcessor::new();
        let confirmation = processor.authorize("tok_123").await.unwrap();
        assert_eq!(confirmation.amount_minor, 50);
        assert_eq!(processor.authorized(), vec!["tok_123"]);
    }

    #[tokio::test]
    async fn test_declining_mock_charges() {
        let processor = MockChargeProcessor::declining();
        assert!(processor.authorize("tok_123").await.is_err());
        assert!(processor.authorized().is_empty());
    }
}
