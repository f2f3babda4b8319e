//! Change notifications emitted by the cart store.

use serde::Serialize;

use crate::ids::ProductId;

/// A change that was applied to the cart.
///
/// Listeners receive the event together with the state after the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// A product was added or its quantity bumped by one.
    ItemAdded { id: ProductId, quantity: i64 },
    /// A quantity was set to a new value of at least 1.
    QuantityChanged { id: ProductId, quantity: i64 },
    /// An item left the cart.
    ItemRemoved { id: ProductId },
    /// All items were removed.
    Cleared,
    /// The cart panel was shown or hidden.
    VisibilityChanged { open: bool },
    /// The whole state was replaced from a snapshot.
    Restored,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shape() {
        let shown = serde_json::to_value(CartEvent::VisibilityChanged { open: true }).unwrap();
        assert_eq!(shown, serde_json::json!({"type": "visibility_changed", "open": true}));

        let added = serde_json::to_value(CartEvent::ItemAdded {
            id: ProductId::new("1"),
            quantity: 2,
        })
        .unwrap();
        assert_eq!(added, serde_json::json!({"type": "item_added", "id": "1", "quantity": 2}));
    }
}
