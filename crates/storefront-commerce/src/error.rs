//! Commerce error types.

use thiserror::Error;

use crate::money::Currency;

/// Errors that can occur in storefront operations.
///
/// Cart mutations never fail; these come from parsing, checkout, payment
/// and persistence.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A string did not name a known value of some enum.
    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    /// A saved cart is priced in a different currency than the shop.
    #[error("Saved cart '{session}' is priced in {saved}, but the shop uses {configured}")]
    SavedCartCurrency {
        session: String,
        saved: Currency,
        configured: Currency,
    },

    /// Nothing to pay for.
    #[error("Nothing to check out: the cart is empty")]
    EmptyCheckout,

    /// The payment gateway refused the charge.
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    /// Persistence error.
    #[error("Cache error: {0}")]
    Cache(#[from] storefront_cache::CacheError),
}

impl CommerceError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        CommerceError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}
