//! Address Normalization
//!
//! Folds the structured international address submitted by the browser into
//! the two-line street format and single postal code the shipping-rate
//! provider expects. Empty string is the absence marker throughout; there is
//! no distinguished null.

use serde::{Deserialize, Serialize};

/// Shipping address as submitted by the browser payment sheet.
///
/// All fields default to empty so a sparse payload still deserializes; the
/// rate provider is the one that decides whether the address is usable.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    /// Ordered street address lines
    pub address_line: Vec<String>,

    /// Sub-city locality (e.g. a neighborhood or suburb)
    pub dependent_locality: String,

    pub postal_code: String,

    /// Postal routing code used where postal codes are absent (e.g. CEDEX)
    pub sorting_code: String,

    pub recipient: String,
    pub organization: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub phone: String,
}

/// Address folded into the shape the rate provider takes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedAddress {
    /// First folded address line, or empty
    pub street1: String,

    /// Remaining folded lines joined with ", ", or empty
    pub street2: String,

    /// Postal code, with the sorting code standing in when no postal code
    /// was submitted
    pub postal_code: String,
}

/// Fold an address into [`NormalizedAddress`].
///
/// The dependent locality is always appended as the last address line. The
/// sorting code is appended as an address line only when a postal code is
/// already present; otherwise it becomes the postal code. The caller's line
/// list is never mutated.
pub fn normalize(address: &ShippingAddress) -> NormalizedAddress {
    let mut lines = address.address_line.clone();

    if !address.dependent_locality.is_empty() {
        lines.push(address.dependent_locality.clone());
    }

    let mut postal_code = address.postal_code.clone();
    if !address.sorting_code.is_empty() {
        if postal_code.is_empty() {
            postal_code = address.sorting_code.clone();
        } else {
            lines.push(address.sorting_code.clone());
        }
    }

    let street1 = lines.first().cloned().unwrap_or_default();
    let street2 = if lines.len() > 1 {
        lines[1..].join(", ")
    } else {
        String::new()
    };

    NormalizedAddress {
        street1,
        street2,
        postal_code,
    }
}
