//! Saving cart snapshots between runs.

use serde::{Deserialize, Serialize};
use storefront_cache::{cache_key, Cache};

use crate::cart::{CartState, CartStore};
use crate::error::CommerceError;
use crate::money::Currency;

const CART_PREFIX: &str = "cart";

/// A snapshot plus the currency its prices are in.
#[derive(Serialize, Deserialize)]
struct SavedCart<S> {
    currency: Currency,
    #[serde(flatten)]
    state: S,
}

/// Stores one [`CartState`] per session in a [`Cache`].
///
/// The store itself never persists; callers save after the operations they
/// care about, typically from a command handler or a subscriber.
#[derive(Debug)]
pub struct CartRepository {
    cache: Cache,
}

impl CartRepository {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Load the saved cart for `session`, or an empty cart if none exists.
    ///
    /// A cart saved in another currency is left alone on disk and reported as
    /// [`CommerceError::SavedCartCurrency`], since its prices cannot be read
    /// in `currency`.
    pub fn load(&self, session: &str, currency: Currency) -> Result<CartStore, CommerceError> {
        let saved: Option<SavedCart<CartState>> =
            self.cache.get(&cache_key!(CART_PREFIX, session))?;
        match saved {
            Some(saved) if saved.currency != currency => Err(CommerceError::SavedCartCurrency {
                session: session.to_string(),
                saved: saved.currency,
                configured: currency,
            }),
            Some(saved) => {
                tracing::debug!(session, items = saved.state.items.len(), "loaded saved cart");
                Ok(CartStore::restore(currency, saved.state))
            }
            None => Ok(CartStore::new(currency)),
        }
    }

    /// Save the current state of `cart` for `session`.
    pub fn save(&self, session: &str, cart: &CartStore) -> Result<(), CommerceError> {
        let saved = SavedCart {
            currency: cart.currency(),
            state: cart.state(),
        };
        self.cache.set(&cache_key!(CART_PREFIX, session), &saved)?;
        Ok(())
    }

    /// Forget the saved cart for `session`.
    pub fn delete(&self, session: &str) -> Result<(), CommerceError> {
        self.cache.delete(&cache_key!(CART_PREFIX, session))?;
        Ok(())
    }

    /// Sessions that have a saved cart.
    pub fn sessions(&self) -> Result<Vec<String>, CommerceError> {
        let prefix = format!("{}:", CART_PREFIX);
        Ok(self
            .cache
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .collect())
    }
}
