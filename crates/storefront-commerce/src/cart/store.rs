//! The cart store: sole owner of in-session cart state.

use std::fmt;

use crate::cart::{CartEvent, CartState, LineItem, ProductDescriptor, SubscriptionId};
use crate::ids::ProductId;
use crate::money::{Currency, Money};

type Listener = Box<dyn FnMut(&CartEvent, &CartState) + Send>;

/// Holds the ordered line items and panel visibility for one session.
///
/// Every price in the cart is read in the store's currency. All mutations go
/// through the methods below. Each one runs to completion and then notifies
/// subscribers, once, if and only if the state changed.
///
/// ```
/// use storefront_commerce::cart::{CartStore, ProductDescriptor};
/// use storefront_commerce::money::{Currency, Money};
///
/// let mut cart = CartStore::new(Currency::SAR);
/// let product = ProductDescriptor::new("p1", "Arabic Numbers", 4500, "");
/// cart.add_item(product.clone());
/// cart.add_item(product);
///
/// assert_eq!(cart.total_items(), 2);
/// assert_eq!(cart.total_price(), Money::from_major(90, Currency::SAR));
/// ```
pub struct CartStore {
    currency: Currency,
    state: CartState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// Create an empty, closed cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            state: CartState::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a store from a persisted snapshot.
    ///
    /// See [`CartStore::load`] for how the snapshot is cleaned up.
    pub fn restore(currency: Currency, state: CartState) -> Self {
        let mut store = Self::new(currency);
        store.state = store.sanitize(state);
        store
    }

    /// Replace the current state with a snapshot and notify subscribers.
    ///
    /// Items with a quantity below 1 are dropped and repeated ids are
    /// merged.
    pub fn load(&mut self, state: CartState) {
        self.state = self.sanitize(state);
        self.notify(CartEvent::Restored);
    }

    fn sanitize(&self, state: CartState) -> CartState {
        let before = state.items.len();
        let state = state.normalized();
        let removed = before - state.items.len();
        if removed > 0 {
            tracing::warn!(removed, "cart snapshot had invalid or repeated items");
        }
        state
    }

    /// Add one unit of `product`.
    ///
    /// If an item with the same id is already in the cart its quantity goes up
    /// by one and the stored title, price and image are kept. Otherwise the
    /// product is appended with quantity 1. Any descriptor is accepted.
    pub fn add_item(&mut self, product: ProductDescriptor) {
        let (id, quantity) = match self.state.items.iter_mut().find(|i| i.id == product.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(1);
                (existing.id.clone(), existing.quantity)
            }
            None => {
                let item = LineItem::from_descriptor(product);
                let id = item.id.clone();
                self.state.items.push(item);
                (id, 1)
            }
        };

        tracing::debug!(%id, quantity, "cart item added");
        self.notify(CartEvent::ItemAdded { id, quantity });
    }

    /// Remove the item with `id`. Returns `false` if it was not in the cart.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.state.items.len();
        self.state.items.retain(|i| &i.id != id);
        let removed = self.state.items.len() < len_before;
        if removed {
            tracing::debug!(%id, "cart item removed");
            self.notify(CartEvent::ItemRemoved { id: id.clone() });
        }
        removed
    }

    /// Set the quantity of the item with `id`.
    ///
    /// A quantity below 1 removes the item. Unknown ids are ignored. Returns
    /// whether the cart changed.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove_item(id);
        }

        let Some(item) = self.state.items.iter_mut().find(|i| &i.id == id) else {
            return false;
        };
        if item.quantity == quantity {
            return false;
        }
        item.quantity = quantity;

        tracing::debug!(%id, quantity, "cart quantity updated");
        self.notify(CartEvent::QuantityChanged {
            id: id.clone(),
            quantity,
        });
        true
    }

    /// Remove every item. Panel visibility is left as it is.
    pub fn clear_cart(&mut self) {
        if self.state.items.is_empty() {
            return;
        }
        self.state.items.clear();
        tracing::debug!("cart cleared");
        self.notify(CartEvent::Cleared);
    }

    /// Show or hide the cart panel.
    pub fn set_open(&mut self, open: bool) {
        if self.state.is_open == open {
            return;
        }
        self.state.is_open = open;
        self.notify(CartEvent::VisibilityChanged { open });
    }

    /// Flip panel visibility and return the new value.
    pub fn toggle_open(&mut self) -> bool {
        let open = !self.state.is_open;
        self.set_open(open);
        open
    }

    /// Sum of quantities across all items, for the header badge.
    pub fn total_items(&self) -> i64 {
        self.state
            .items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of `price * quantity` across all items.
    pub fn total_price(&self) -> Money {
        let amount = self
            .state
            .items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.line_total()));
        Money::new(amount, self.currency)
    }

    /// Unit price of `item` in the cart's currency.
    pub fn unit_price(&self, item: &LineItem) -> Money {
        Money::new(item.price, self.currency)
    }

    /// `price * quantity` of `item` in the cart's currency.
    pub fn line_total(&self, item: &LineItem) -> Money {
        Money::new(item.line_total(), self.currency)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.state.items
    }

    pub fn get_item(&self, id: &ProductId) -> Option<&LineItem> {
        self.state.items.iter().find(|i| &i.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    /// Number of distinct items.
    pub fn unique_item_count(&self) -> usize {
        self.state.items.len()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Borrow the current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Copy of the current state, e.g. for persisting.
    pub fn snapshot(&self) -> CartState {
        self.state.clone()
    }

    /// Register a listener called after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, &CartState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() < len_before
    }

    fn notify(&mut self, event: CartEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event, &self.state);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("currency", &self.currency)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
