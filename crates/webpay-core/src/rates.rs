//! Rate Selection
//!
//! Maps provider rate quotes into the public shipping options returned to the
//! browser and picks the cheapest one as the pre-selected default.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A currency/value pair as it crosses the wire.
///
/// The value stays a decimal string end to end; arithmetic happens on
/// `Decimal`, never f64.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub currency: String,
    pub value: String,
}

impl Money {
    pub fn new(currency: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            value: value.into(),
        }
    }

    /// Parse the value for numeric comparison. `None` when the provider sent
    /// something that is not a number.
    pub fn amount(&self) -> Option<Decimal> {
        self.value.trim().parse().ok()
    }
}

/// A shipping-cost offer from the rate provider.
#[derive(Clone, Debug, Deserialize)]
pub struct RateQuote {
    /// Provider's opaque identifier for this rate
    pub object_id: String,

    /// Carrier name (e.g. "USPS")
    pub provider: String,

    /// Service level (e.g. "Priority Mail")
    pub servicelevel_name: String,

    pub currency: String,

    /// Decimal amount as a string
    pub amount: String,
}

/// A shipping option as presented to the browser payment sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub id: String,

    /// Carrier and service level, space-joined
    pub label: String,

    pub amount: Money,

    /// Exactly one option in a non-empty set carries `true`
    pub selected: bool,
}

impl From<RateQuote> for ShippingOption {
    fn from(quote: RateQuote) -> Self {
        Self {
            id: quote.object_id,
            label: format!("{} {}", quote.provider, quote.servicelevel_name),
            amount: Money::new(quote.currency, quote.amount),
            selected: false,
        }
    }
}

/// Map quotes to shipping options and mark the cheapest one selected.
///
/// The scan is stable: the first strictly-lower amount replaces the running
/// minimum, so ties resolve to the first occurrence. Quotes whose amount does
/// not parse are still returned as options but never win the selection. An
/// empty input yields an empty list with nothing selected.
pub fn select_cheapest(quotes: Vec<RateQuote>) -> Vec<ShippingOption> {
    let mut options: Vec<ShippingOption> = quotes.into_iter().map(Into::into).collect();

    let mut min_amount: Option<Decimal> = None;
    let mut min_index: Option<usize> = None;
    for (i, option) in options.iter().enumerate() {
        let Some(amount) = option.amount.amount() else {
            tracing::warn!(id = %option.id, value = %option.amount.value, "unparseable rate amount");
            continue;
        };
        if min_amount.is_none_or(|min| amount < min) {
            min_amount = Some(amount);
            min_index = Some(i);
        }
    }

    if let Some(i) = min_index {
        options[i].selected = true;
    }

    options
}
