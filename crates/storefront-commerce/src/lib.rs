//! Storefront domain types and logic.
//!
//! - **Cart**: the [`CartStore`](cart::CartStore), sole owner of the session's
//!   line items and panel visibility, with subscribe/notify for views
//! - **Catalog**: shop products and age/kind filtering, training courses
//! - **Membership**: plan tiers, billing periods, annual savings
//! - **Checkout**: order summary, payment gateway seam, completed orders
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin(Currency::SAR);
//! let mut cart = CartStore::new(Currency::SAR);
//!
//! let numbers = catalog.get(&ProductId::new("1")).unwrap();
//! cart.add_item(numbers.descriptor());
//! cart.add_item(numbers.descriptor());
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price().display(), "90.00 SAR");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod membership;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        CartEvent, CartRepository, CartState, CartStore, LineItem, ProductDescriptor,
        SubscriptionId,
    };

    // Catalog
    pub use crate::catalog::{
        AgeGroup, Catalog, CatalogFilter, Course, CourseLevel, Lesson, Product, ProductKind,
    };

    // Membership
    pub use crate::membership::{BillingPeriod, MembershipPlan, MembershipTier, PlanFeature, Savings};

    // Checkout
    pub use crate::checkout::{
        Checkout, CheckoutLine, CheckoutRequest, CheckoutSummary, Order, PaymentGateway,
        PaymentMethod, PaymentReceipt, PaymentRequest, SimulatedGateway,
    };
}
