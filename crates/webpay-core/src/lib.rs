//! # webpay-core
//!
//! Core checkout logic for the web-payments demo, free of any I/O.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     webpay-core                           │
//! │  ┌────────────┐  ┌────────────┐  ┌───────────────────┐   │
//! │  │  Address   │  │    Rate    │  │    Instrument     │   │
//! │  │ Normalizer │  │  Selector  │  │    Validation     │   │
//! │  └────────────┘  └────────────┘  └───────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The server and client crates call into these pure functions; every external
//! collaborator (rate provider, charge processor, payment UI) sits behind a
//! trait in its own crate so this logic stays testable without the network.

pub mod address;
pub mod envelope;
pub mod error;
pub mod payment;
pub mod rates;

pub use address::{NormalizedAddress, ShippingAddress, normalize};
pub use envelope::{Envelope, Status};
pub use error::{CheckoutError, Result};
pub use payment::{InstrumentDetails, InstrumentPayload, validate_instrument};
pub use rates::{Money, RateQuote, ShippingOption, select_cheapest};
