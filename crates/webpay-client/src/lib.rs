//! # webpay-client
//!
//! The client side of the checkout flow: the event loop that sits between
//! the platform payment sheet and the checkout server.
//!
//! ```text
//! ┌───────────────┐  events   ┌─────────────────┐  /ship, /buy  ┌────────┐
//! │ PaymentSurface│──────────▶│ CheckoutSession │──────────────▶│ server │
//! │ (platform UI) │◀──────────│   (event loop)  │◀──────────────│        │
//! └───────────────┘  details  └─────────────────┘   envelopes   └────────┘
//! ```
//!
//! [`PaymentSurface`] models the platform payment UI (address and option
//! change events, payment approval, completion reporting, abort).
//! [`CheckoutApi`] models the server endpoints. [`CheckoutSession`] drives
//! one checkout: recalculates shipping on every address change, keeps the
//! displayed totals in sync, posts exactly one authorization after approval,
//! and aborts the whole session after a 20-minute timeout.

pub mod api;
pub mod error;
pub mod session;
pub mod surface;

pub use api::{CheckoutApi, HttpCheckoutApi, InstrumentSubmission, SubmissionDetails};
pub use error::{FlowError, Result};
pub use session::{CheckoutConfig, CheckoutSession, FlowOutcome};
pub use surface::{LineItem, OrderDetails, PaymentSurface, SurfaceEvent};
