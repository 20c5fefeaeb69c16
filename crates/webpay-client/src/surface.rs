//! Payment Surface
//!
//! `PaymentSurface` models the platform payment UI: it emits the user's
//! shipping and approval events and displays the order details the session
//! keeps up to date. A browser binding would wrap the PaymentRequest sheet;
//! tests script the events directly.

use async_trait::async_trait;

use webpay_core::{Money, ShippingAddress, ShippingOption, Status};

use crate::api::InstrumentSubmission;
use crate::error::Result;

/// One event from the platform payment sheet.
#[derive(Clone, Debug)]
pub enum SurfaceEvent {
    /// The user picked or edited a shipping address
    AddressChange(ShippingAddress),

    /// The user picked a different shipping option, by id
    OptionChange(String),

    /// The user approved payment with this instrument
    Approved(InstrumentSubmission),

    /// The user dismissed the sheet
    Cancelled,
}

/// A labelled amount shown on the sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub label: String,
    pub amount: Money,
}

impl From<&ShippingOption> for LineItem {
    fn from(option: &ShippingOption) -> Self {
        Self {
            label: option.label.clone(),
            amount: option.amount.clone(),
        }
    }
}

/// Order details as displayed by the sheet: running total, its breakdown,
/// and the currently offered shipping options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderDetails {
    pub total: LineItem,

    /// Selected shipping first (when any), then the sub-total
    pub display_items: Vec<LineItem>,

    /// Empty when shipping cannot be calculated
    pub shipping_options: Vec<ShippingOption>,
}

/// The platform payment UI, as seen by the session event loop.
#[async_trait]
pub trait PaymentSurface: Send {
    /// Next user event. Pends until the user does something.
    async fn next_event(&mut self) -> Result<SurfaceEvent>;

    /// Push refreshed order details onto the sheet.
    async fn update_details(&mut self, details: &OrderDetails) -> Result<()>;

    /// Report the final outcome after the authorization attempt.
    async fn complete(&mut self, result: Status, message: &str) -> Result<()>;

    /// Tear the sheet down. Fails when the platform refuses, e.g. while the
    /// user is mid-payment.
    async fn abort(&mut self) -> Result<()>;
}
