//! Shipping-Rate Provider
//!
//! `RateProvider` abstracts the shipping-rate quoting service; `ShippoClient`
//! implements it against the Shippo shipments API. One quote request carries
//! the fixed origin address and parcel plus the normalized destination, and
//! comes back with a list of rate quotes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use webpay_core::{NormalizedAddress, RateQuote, ShippingAddress};

use crate::error::{ProviderError, Result};

const SHIPPO_SHIPMENTS_URL: &str = "https://api.shippo.com/v1/shipments/";

/// Shipping-rate quoting service (Strategy pattern).
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Quote shipping rates from the configured origin to `address`.
    ///
    /// `normalized` is the folded form of the same address; the caller runs
    /// the normalization so this trait stays a pure transport seam.
    async fn quote(
        &self,
        address: &ShippingAddress,
        normalized: &NormalizedAddress,
    ) -> Result<Vec<RateQuote>>;

    /// Provider name, for logs
    fn name(&self) -> &str;
}

/// Fixed origin address the demo ships from. A deployment constant, not a
/// per-request input.
#[derive(Clone, Debug, Serialize)]
pub struct OriginAddress {
    pub name: String,
    pub company: String,
    pub street1: String,
    pub street2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub email: String,
}

impl Default for OriginAddress {
    fn default() -> Self {
        Self {
            name: "Rouslan Solomakhin".into(),
            company: "Google".into(),
            street1: "340 Main St".into(),
            street2: String::new(),
            city: "Los Angeles".into(),
            state: "CA".into(),
            zip: "90291".into(),
            country: "US".into(),
            phone: "310-310-6000".into(),
            email: "test.source@test.com".into(),
        }
    }
}

/// Fixed parcel the demo quotes rates for: 5×5×5 in, 2 lb.
#[derive(Clone, Debug, Serialize)]
pub struct Parcel {
    pub length: String,
    pub width: String,
    pub height: String,
    pub distance_unit: String,
    pub weight: String,
    pub mass_unit: String,
}

impl Default for Parcel {
    fn default() -> Self {
        Self {
            length: "5".into(),
            width: "5".into(),
            height: "5".into(),
            distance_unit: "in".into(),
            weight: "2".into(),
            mass_unit: "lb".into(),
        }
    }
}

/// Deployment constants for quote requests.
#[derive(Clone, Debug)]
pub struct ShipmentConfig {
    pub origin: OriginAddress,
    pub parcel: Parcel,

    /// Placeholder destination email; the payment sheet does not collect one
    pub destination_email: String,

    /// Bound on the outbound HTTP call
    pub timeout_secs: u64,
}

impl Default for ShipmentConfig {
    fn default() -> Self {
        Self {
            origin: OriginAddress::default(),
            parcel: Parcel::default(),
            destination_email: "test.destination@test.com".into(),
            timeout_secs: 30,
        }
    }
}

/// Shippo API client
pub struct ShippoClient {
    client: reqwest::Client,
    api_key: String,
    config: ShipmentConfig,
    url: String,
}

impl ShippoClient {
    /// Create a client with the given API key and shipment constants.
    pub fn new(api_key: impl Into<String>, config: ShipmentConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
            url: SHIPPO_SHIPMENTS_URL.into(),
        })
    }

    /// Create from the `SHIPPO_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SHIPPO_API_KEY")
            .map_err(|_| ProviderError::Config("SHIPPO_API_KEY not set".into()))?;
        Self::new(api_key, ShipmentConfig::default())
    }

    /// Point the client at a different shipments URL (tests).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    fn build_shipment(
        &self,
        address: &ShippingAddress,
        normalized: &NormalizedAddress,
    ) -> ShipmentRequest {
        ShipmentRequest {
            object_purpose: PURCHASE,
            address_from: PurposeAddress {
                object_purpose: PURCHASE,
                name: self.config.origin.name.clone(),
                company: self.config.origin.company.clone(),
                street1: self.config.origin.street1.clone(),
                street2: self.config.origin.street2.clone(),
                city: self.config.origin.city.clone(),
                state: self.config.origin.state.clone(),
                zip: self.config.origin.zip.clone(),
                country: self.config.origin.country.clone(),
                phone: self.config.origin.phone.clone(),
                email: self.config.origin.email.clone(),
            },
            address_to: PurposeAddress {
                object_purpose: PURCHASE,
                name: address.recipient.clone(),
                company: address.organization.clone(),
                street1: normalized.street1.clone(),
                street2: normalized.street2.clone(),
                city: address.city.clone(),
                state: address.region.clone(),
                zip: normalized.postal_code.clone(),
                country: address.country.clone(),
                phone: address.phone.clone(),
                email: self.config.destination_email.clone(),
            },
            parcel: self.config.parcel.clone(),
            is_async: false,
        }
    }
}

#[async_trait]
impl RateProvider for ShippoClient {
    async fn quote(
        &self,
        address: &ShippingAddress,
        normalized: &NormalizedAddress,
    ) -> Result<Vec<RateQuote>> {
        let shipment = self.build_shipment(address, normalized);

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("ShippoToken {}", self.api_key))
            .json(&shipment)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "shipment creation returned {status}: {body}"
            )));
        }

        let shipment: ShipmentResponse = response.json().await?;
        tracing::debug!(rates = shipment.rates_list.len(), "shipment rates received");
        Ok(shipment.rates_list)
    }

    fn name(&self) -> &str {
        "Shippo"
    }
}

const PURCHASE: &str = "PURCHASE";

#[derive(Debug, Serialize)]
struct ShipmentRequest {
    object_purpose: &'static str,
    address_from: PurposeAddress,
    address_to: PurposeAddress,
    parcel: Parcel,
    #[serde(rename = "async")]
    is_async: bool,
}

#[derive(Debug, Serialize)]
struct PurposeAddress {
    object_purpose: &'static str,
    name: String,
    company: String,
    street1: String,
    street2: String,
    city: String,
    state: String,
    zip: String,
    country: String,
    phone: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct ShipmentResponse {
    #[serde(default)]
    rates_list: Vec<RateQuote>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use webpay_core::normalize;

    fn destination() -> ShippingAddress {
        ShippingAddress {
            address_line: vec!["1600 Amphitheatre Pkwy".into()],
            recipient: "Jane Smith".into(),
            organization: "Google".into(),
            city: "Mountain View".into(),
            region: "CA".into(),
            postal_code: "94043".into(),
            country: "US".into(),
            phone: "650-253-0000".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_shipment_request_shape() {
        let client = ShippoClient::new("shippo_test_key", ShipmentConfig::default()).unwrap();
        let address = destination();
        let shipment = client.build_shipment(&address, &normalize(&address));

        let json = serde_json::to_value(&shipment).unwrap();
        assert_eq!(json["object_purpose"], "PURCHASE");
        assert_eq!(json["async"], false);
        assert_eq!(json["address_from"]["street1"], "340 Main St");
        assert_eq!(json["address_from"]["zip"], "90291");
        assert_eq!(json["address_to"]["name"], "Jane Smith");
        assert_eq!(json["address_to"]["street1"], "1600 Amphitheatre Pkwy");
        assert_eq!(json["address_to"]["state"], "CA");
        assert_eq!(json["parcel"]["length"], "5");
        assert_eq!(json["parcel"]["mass_unit"], "lb");
    }

    #[test]
    fn test_rates_list_deserializes() {
        let body = r#"{
            "object_id": "sh_1",
            "object_status": "SUCCESS",
            "rates_list": [
                {
                    "object_id": "r_1",
                    "provider": "USPS",
                    "servicelevel_name": "Priority Mail",
                    "currency": "USD",
                    "amount": "8.00",
                    "days": 2
                }
            ]
        }"#;
        let shipment: ShipmentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(shipment.rates_list.len(), 1);
        assert_eq!(shipment.rates_list[0].object_id, "r_1");
        assert_eq!(shipment.rates_list[0].amount, "8.00");
    }

    #[test]
    fn test_missing_rates_list_is_empty() {
        let shipment: ShipmentResponse = serde_json::from_str(r#"{"object_id":"sh_1"}"#).unwrap();
        assert!(shipment.rates_list.is_empty());
    }
}
