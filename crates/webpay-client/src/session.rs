//! Checkout Session
//!
//! The event loop for one checkout: reacts to address and option changes by
//! refreshing shipping options and totals, posts exactly one authorization
//! after approval, and enforces the 20-minute session timeout.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

use webpay_core::{Envelope, Money, ShippingOption, Status};

use crate::api::CheckoutApi;
use crate::error::{FlowError, Result};
use crate::surface::{LineItem, OrderDetails, PaymentSurface, SurfaceEvent};

/// How a checkout session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The authorization ran and its outcome was reported to the sheet
    Completed { result: Status, message: String },

    /// The user dismissed the sheet before approving
    Cancelled,

    /// The session hit its wall-clock bound and the sheet was aborted
    TimedOut,
}

/// Session constants.
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// Platform payment method that goes to the server; anything else is
    /// simulated locally
    pub supported_method: String,

    /// Fixed demo sub-total
    pub subtotal: Decimal,

    pub currency: String,

    /// Wall-clock bound on the whole session
    pub session_timeout: Duration,

    /// Pretend server latency for the local simulation path
    pub simulation_latency: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            supported_method: "https://android.com/pay".into(),
            subtotal: dec!(0.50),
            currency: "USD".into(),
            session_timeout: Duration::from_secs(20 * 60),
            simulation_latency: Duration::from_secs(5),
        }
    }
}

/// One checkout session against a checkout server.
pub struct CheckoutSession {
    api: Arc<dyn CheckoutApi>,
    config: CheckoutConfig,
}

impl CheckoutSession {
    pub fn new(api: Arc<dyn CheckoutApi>, config: CheckoutConfig) -> Self {
        Self { api, config }
    }

    /// Drive the session to completion.
    ///
    /// Once the timeout elapses the sheet is aborted; if the platform
    /// refuses the abort (the user is mid-payment) that is reported as
    /// [`FlowError::AbortBlocked`] rather than swallowed.
    pub async fn run<S: PaymentSurface>(&self, surface: &mut S) -> Result<FlowOutcome> {
        let driven =
            tokio::time::timeout(self.config.session_timeout, self.drive(surface)).await;
        match driven {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(
                    "payment timed out after {}s, aborting",
                    self.config.session_timeout.as_secs()
                );
                match surface.abort().await {
                    Ok(()) => Ok(FlowOutcome::TimedOut),
                    Err(e) => Err(FlowError::AbortBlocked(e.to_string())),
                }
            }
        }
    }

    async fn drive<S: PaymentSurface>(&self, surface: &mut S) -> Result<FlowOutcome> {
        let mut details = self.details_for(&[]);

        loop {
            match surface.next_event().await? {
                SurfaceEvent::AddressChange(address) => {
                    let options = match self.api.ship(&address).await {
                        Ok(envelope) if envelope.is_success() => {
                            envelope.shipping_options.unwrap_or_default()
                        }
                        Ok(_) => {
                            tracing::warn!("unable to calculate shipping options");
                            Vec::new()
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "shipping calculation failed");
                            Vec::new()
                        }
                    };
                    details = self.details_for(&options);
                    surface.update_details(&details).await?;
                }
                SurfaceEvent::OptionChange(id) => {
                    let mut options = details.shipping_options.clone();
                    for option in &mut options {
                        option.selected = option.id == id;
                    }
                    details = self.details_for(&options);
                    surface.update_details(&details).await?;
                }
                SurfaceEvent::Approved(instrument) => {
                    if instrument.method_name != self.config.supported_method {
                        // Other instruments (e.g. basic-card) never leave the
                        // client; pretend a processor round trip happened.
                        tokio::time::sleep(self.config.simulation_latency).await;
                        let message = "Simulated credit card authorization";
                        surface.complete(Status::Success, message).await?;
                        return Ok(FlowOutcome::Completed {
                            result: Status::Success,
                            message: message.into(),
                        });
                    }

                    let (result, message) = match self.api.buy(&instrument).await {
                        Ok(Envelope {
                            status, message, ..
                        }) => (status, message),
                        Err(e) => {
                            tracing::warn!(error = %e, "authorization request failed");
                            (Status::Fail, "Error sending instrument to server.".into())
                        }
                    };
                    surface.complete(result, &message).await?;
                    return Ok(FlowOutcome::Completed { result, message });
                }
                SurfaceEvent::Cancelled => return Ok(FlowOutcome::Cancelled),
            }
        }
    }

    /// Totals and display items for the current options: sub-total plus the
    /// selected shipping price, selected shipping listed first.
    fn details_for(&self, options: &[ShippingOption]) -> OrderDetails {
        let selected = options.iter().find(|o| o.selected);

        let mut total = self.config.subtotal;
        if let Some(price) = selected.and_then(|o| o.amount.amount()) {
            total += price;
        }

        let mut display_items = Vec::new();
        if let Some(option) = selected {
            display_items.push(LineItem::from(option));
        }
        display_items.push(LineItem {
            label: "Sub-total".into(),
            amount: Money::new(&self.config.currency, format!("{:.2}", self.config.subtotal)),
        });

        OrderDetails {
            total: LineItem {
                label: "Total".into(),
                amount: Money::new(&self.config.currency, format!("{total:.2}")),
            },
            display_items,
            shipping_options: options.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use webpay_core::ShippingAddress;

    use crate::api::{InstrumentSubmission, SubmissionDetails};

    struct ScriptedSurface {
        events: VecDeque<SurfaceEvent>,
        updates: Vec<OrderDetails>,
        completion: Option<(Status, String)>,
        aborted: bool,
        abort_blocked: bool,
    }

    impl ScriptedSurface {
        fn new(events: Vec<SurfaceEvent>) -> Self {
            Self {
                events: events.into(),
                updates: Vec::new(),
                completion: None,
                aborted: false,
                abort_blocked: false,
            }
        }
    }

    #[async_trait]
    impl PaymentSurface for ScriptedSurface {
        async fn next_event(&mut self) -> Result<SurfaceEvent> {
            match self.events.pop_front() {
                Some(event) => Ok(event),
                // Script exhausted: pend like a user who walked away
                None => std::future::pending().await,
            }
        }

        async fn update_details(&mut self, details: &OrderDetails) -> Result<()> {
            self.updates.push(details.clone());
            Ok(())
        }

        async fn complete(&mut self, result: Status, message: &str) -> Result<()> {
            self.completion = Some((result, message.to_string()));
            Ok(())
        }

        async fn abort(&mut self) -> Result<()> {
            if self.abort_blocked {
                return Err(FlowError::Surface(
                    "user is currently in the process of paying".into(),
                ));
            }
            self.aborted = true;
            Ok(())
        }
    }

    struct ScriptedApi {
        ship_response: Envelope,
        buy_response: Envelope,
        buy_calls: Mutex<u32>,
    }

    impl ScriptedApi {
        fn new(ship_response: Envelope, buy_response: Envelope) -> Self {
            Self {
                ship_response,
                buy_response,
                buy_calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl CheckoutApi for ScriptedApi {
        async fn ship(&self, _address: &ShippingAddress) -> Result<Envelope> {
            Ok(self.ship_response.clone())
        }

        async fn buy(&self, _instrument: &InstrumentSubmission) -> Result<Envelope> {
            *self.buy_calls.lock().unwrap() += 1;
            Ok(self.buy_response.clone())
        }
    }

    fn options() -> Vec<ShippingOption> {
        vec![
            ShippingOption {
                id: "express".into(),
                label: "FedEx 2 Day".into(),
                amount: Money::new("USD", "12.50"),
                selected: false,
            },
            ShippingOption {
                id: "ground".into(),
                label: "USPS Priority Mail".into(),
                amount: Money::new("USD", "8.00"),
                selected: true,
            },
        ]
    }

    fn approval(method: &str) -> SurfaceEvent {
        SurfaceEvent::Approved(InstrumentSubmission {
            method_name: method.into(),
            details: SubmissionDetails {
                payment_method_token: r#"{"id":"tok_123"}"#.into(),
            },
        })
    }

    fn config() -> CheckoutConfig {
        CheckoutConfig {
            simulation_latency: Duration::ZERO,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_address_change_updates_totals() {
        let api = Arc::new(ScriptedApi::new(
            Envelope::calculated(options()),
            Envelope::payment_authorized(),
        ));
        let session = CheckoutSession::new(api, config());
        let mut surface = ScriptedSurface::new(vec![
            SurfaceEvent::AddressChange(ShippingAddress::default()),
            SurfaceEvent::Cancelled,
        ]);

        session.run(&mut surface).await.unwrap();

        let details = surface.updates.last().unwrap();
        assert_eq!(details.total.amount.value, "8.50");
        assert_eq!(details.display_items.len(), 2);
        assert_eq!(details.display_items[0].label, "USPS Priority Mail");
        assert_eq!(details.display_items[1].label, "Sub-total");
        assert_eq!(details.display_items[1].amount.value, "0.50");
        assert_eq!(details.shipping_options.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_shipping_clears_options() {
        let api = Arc::new(ScriptedApi::new(
            Envelope::shipping_failed(),
            Envelope::payment_authorized(),
        ));
        let session = CheckoutSession::new(api, config());
        let mut surface = ScriptedSurface::new(vec![
            SurfaceEvent::AddressChange(ShippingAddress::default()),
            SurfaceEvent::Cancelled,
        ]);

        session.run(&mut surface).await.unwrap();

        let details = surface.updates.last().unwrap();
        assert!(details.shipping_options.is_empty());
        assert_eq!(details.total.amount.value, "0.50");
        assert_eq!(details.display_items.len(), 1);
    }

    #[tokio::test]
    async fn test_option_change_reselects_and_retotals() {
        let api = Arc::new(ScriptedApi::new(
            Envelope::calculated(options()),
            Envelope::payment_authorized(),
        ));
        let session = CheckoutSession::new(api, config());
        let mut surface = ScriptedSurface::new(vec![
            SurfaceEvent::AddressChange(ShippingAddress::default()),
            SurfaceEvent::OptionChange("express".into()),
            SurfaceEvent::Cancelled,
        ]);

        session.run(&mut surface).await.unwrap();

        let details = surface.updates.last().unwrap();
        assert!(details.shipping_options[0].selected);
        assert!(!details.shipping_options[1].selected);
        assert_eq!(details.total.amount.value, "13.00");
        assert_eq!(details.display_items[0].label, "FedEx 2 Day");
    }

    #[tokio::test]
    async fn test_approval_posts_one_authorization() {
        let api = Arc::new(ScriptedApi::new(
            Envelope::calculated(options()),
            Envelope::payment_authorized(),
        ));
        let session = CheckoutSession::new(api.clone(), config());
        let mut surface = ScriptedSurface::new(vec![approval("https://android.com/pay")]);

        let outcome = session.run(&mut surface).await.unwrap();

        assert_eq!(
            outcome,
            FlowOutcome::Completed {
                result: Status::Success,
                message: "Payment authorized".into(),
            }
        );
        assert_eq!(*api.buy_calls.lock().unwrap(), 1);
        assert_eq!(
            surface.completion,
            Some((Status::Success, "Payment authorized".into()))
        );
    }

    #[tokio::test]
    async fn test_failed_authorization_is_terminal() {
        let api = Arc::new(ScriptedApi::new(
            Envelope::calculated(options()),
            Envelope::invalid_request(),
        ));
        let session = CheckoutSession::new(api.clone(), config());
        let mut surface = ScriptedSurface::new(vec![approval("https://android.com/pay")]);

        let outcome = session.run(&mut surface).await.unwrap();

        assert_eq!(
            outcome,
            FlowOutcome::Completed {
                result: Status::Fail,
                message: "Invalid request".into(),
            }
        );
        // No retry: exactly one call even though it failed
        assert_eq!(*api.buy_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_other_method_simulated_locally() {
        let api = Arc::new(ScriptedApi::new(
            Envelope::calculated(options()),
            Envelope::payment_authorized(),
        ));
        let session = CheckoutSession::new(api.clone(), config());
        let mut surface = ScriptedSurface::new(vec![approval("basic-card")]);

        let outcome = session.run(&mut surface).await.unwrap();

        assert_eq!(*api.buy_calls.lock().unwrap(), 0, "no server call");
        assert_eq!(
            outcome,
            FlowOutcome::Completed {
                result: Status::Success,
                message: "Simulated credit card authorization".into(),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_timeout_aborts_sheet() {
        let api = Arc::new(ScriptedApi::new(
            Envelope::calculated(options()),
            Envelope::payment_authorized(),
        ));
        let session = CheckoutSession::new(api, config());
        let mut surface = ScriptedSurface::new(Vec::new());

        let outcome = session.run(&mut surface).await.unwrap();

        assert_eq!(outcome, FlowOutcome::TimedOut);
        assert!(surface.aborted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_abort_is_reported() {
        let api = Arc::new(ScriptedApi::new(
            Envelope::calculated(options()),
            Envelope::payment_authorized(),
        ));
        let session = CheckoutSession::new(api, config());
        let mut surface = ScriptedSurface::new(Vec::new());
        surface.abort_blocked = true;

        let result = session.run(&mut surface).await;

        assert!(matches!(result, Err(FlowError::AbortBlocked(_))));
    }
}
