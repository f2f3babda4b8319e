//! Shopping cart module.
//!
//! The [`CartStore`] is the single owner of cart state for a session. Views
//! receive it by reference and observe changes through [`CartStore::subscribe`].

mod event;
mod item;
mod persist;
mod store;

pub use event::{CartEvent, SubscriptionId};
pub use item::{CartState, LineItem, ProductDescriptor};
pub use persist::CartRepository;
pub use store::CartStore;
