//! Line items and the cart state snapshot.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// What a catalog or listing view hands to [`CartStore::add_item`].
///
/// Prices carry no currency of their own: they are minor units of whatever
/// currency the receiving cart is priced in.
///
/// [`CartStore::add_item`]: crate::cart::CartStore::add_item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDescriptor {
    pub id: ProductId,
    pub title: String,
    /// Unit price in minor units.
    pub price: i64,
    pub image: String,
}

impl ProductDescriptor {
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: i64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}

/// One product or plan in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product or plan identifier, unique within the cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in minor units of the cart's currency.
    pub price: i64,
    /// Always at least 1 while the item is in the cart.
    pub quantity: i64,
    /// Display image reference.
    pub image: String,
}

impl LineItem {
    pub(crate) fn from_descriptor(product: ProductDescriptor) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            quantity: 1,
            image: product.image,
        }
    }

    /// `price * quantity` in minor units, clamped at the `i64` bounds.
    pub fn line_total(&self) -> i64 {
        self.price.saturating_mul(self.quantity)
    }
}

/// Everything the cart panel renders.
///
/// This is also the persisted form of a cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    /// Items in insertion order.
    pub items: Vec<LineItem>,
    /// Whether the cart panel is shown.
    #[serde(default)]
    pub is_open: bool,
}

impl CartState {
    /// Rebuild the cart invariants on a snapshot from an untrusted source.
    ///
    /// Items with a quantity below 1 are dropped. Repeated ids are merged into
    /// the first occurrence by summing quantities.
    pub(crate) fn normalized(self) -> Self {
        let mut items: Vec<LineItem> = Vec::with_capacity(self.items.len());
        for item in self.items {
            if item.quantity < 1 {
                continue;
            }
            match items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => items.push(item),
            }
        }
        Self {
            items,
            is_open: self.is_open,
        }
    }
}
