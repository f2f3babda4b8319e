//! Checkout flow: summarize, charge, then settle the cart.

use serde::{Deserialize, Serialize};

use crate::cart::{CartStore, LineItem};
use crate::checkout::{Order, PaymentGateway, PaymentMethod, PaymentRequest};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::membership::{BillingPeriod, MembershipPlan, MembershipTier};
use crate::money::{Currency, Money};

/// What is being paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CheckoutRequest {
    /// Everything currently in the cart.
    #[default]
    Cart,
    /// A single membership plan. The cart is neither read nor changed.
    Membership {
        tier: MembershipTier,
        period: BillingPeriod,
    },
}

/// One row of the order summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub id: ProductId,
    pub title: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// Set when the line is a membership plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership: Option<(MembershipTier, BillingPeriod)>,
}

impl CheckoutLine {
    /// A cart line priced in `currency`.
    pub fn from_item(item: &LineItem, currency: Currency) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            unit_price: Money::new(item.price, currency),
            quantity: item.quantity,
            membership: None,
        }
    }

    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_multiply(self.quantity)
    }
}

/// The order summary shown when checkout starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub lines: Vec<CheckoutLine>,
    pub total: Money,
}

impl CheckoutSummary {
    /// Build the summary for `request` from the cart's current contents.
    ///
    /// Fails with [`CommerceError::EmptyCheckout`] if a cart checkout has no
    /// items.
    pub fn prepare(cart: &CartStore, request: &CheckoutRequest) -> Result<Self, CommerceError> {
        match *request {
            CheckoutRequest::Cart => {
                if cart.is_empty() {
                    return Err(CommerceError::EmptyCheckout);
                }
                Ok(Self {
                    lines: cart
                        .items()
                        .iter()
                        .map(|item| CheckoutLine::from_item(item, cart.currency()))
                        .collect(),
                    total: cart.total_price(),
                })
            }
            CheckoutRequest::Membership { tier, period } => {
                let plan = MembershipPlan::builtin(tier, cart.currency());
                let price = plan.price(period);
                Ok(Self {
                    lines: vec![CheckoutLine {
                        id: tier.product_id(),
                        title: plan.display_title(period),
                        unit_price: price,
                        quantity: 1,
                        membership: Some((tier, period)),
                    }],
                    total: price,
                })
            }
        }
    }
}

/// Runs payments through a gateway and settles the cart afterwards.
pub struct Checkout<'a, G: PaymentGateway + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: PaymentGateway + ?Sized> Checkout<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Charge for `request` and return the resulting order.
    ///
    /// For a cart checkout the cart is cleared exactly once, after the gateway
    /// accepts the charge. If the charge fails the error is returned and the
    /// cart is left exactly as it was.
    pub async fn complete(
        &self,
        cart: &mut CartStore,
        request: CheckoutRequest,
        method: PaymentMethod,
    ) -> Result<Order, CommerceError> {
        let summary = CheckoutSummary::prepare(cart, &request)?;
        let payment = PaymentRequest {
            order_id: OrderId::generate(),
            amount: summary.total,
            method,
        };

        tracing::info!(
            order_id = %payment.order_id,
            amount = %payment.amount,
            method = %method,
            lines = summary.lines.len(),
            "charging order"
        );

        let receipt = match self.gateway.charge(&payment).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(order_id = %payment.order_id, error = %e, "payment failed");
                return Err(e);
            }
        };

        if request == CheckoutRequest::Cart {
            cart.clear_cart();
        }

        tracing::info!(
            order_id = %payment.order_id,
            transaction_id = %receipt.transaction_id,
            "order paid"
        );
        Ok(Order::new(payment.order_id, summary, receipt))
    }
}
