//! Checkout module.
//!
//! Turns the cart (or a single membership plan) into a paid [`Order`].

mod flow;
mod order;
mod payment;

pub use flow::{Checkout, CheckoutLine, CheckoutRequest, CheckoutSummary};
pub use order::Order;
pub use payment::{PaymentGateway, PaymentMethod, PaymentReceipt, PaymentRequest, SimulatedGateway};
