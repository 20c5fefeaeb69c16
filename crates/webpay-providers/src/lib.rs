//! # webpay-providers
//!
//! External collaborators for the checkout flow, each behind a narrow trait
//! so the core logic stays testable without live network calls:
//!
//! - [`RateProvider`] — shipping-rate quoting, implemented by [`ShippoClient`]
//!   against the Shippo shipments API.
//! - [`ChargeProcessor`] — authorization-only card charges, implemented by
//!   [`StripeProcessor`].
//!
//! Mock implementations of both live in [`mock`] for tests and for running
//! the demo without API keys.

pub mod charge;
pub mod error;
pub mod mock;
pub mod rates;

pub use charge::{ChargeConfig, ChargeConfirmation, ChargeProcessor, StripeProcessor};
pub use error::{ProviderError, Result};
pub use mock::{MockChargeProcessor, MockRateProvider};
pub use rates::{OriginAddress, Parcel, RateProvider, ShipmentConfig, ShippoClient};
