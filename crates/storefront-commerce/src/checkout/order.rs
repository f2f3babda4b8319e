//! Completed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkout::{CheckoutLine, CheckoutSummary, PaymentReceipt};
use crate::ids::OrderId;
use crate::money::Money;

/// A paid order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub lines: Vec<CheckoutLine>,
    pub total: Money,
    pub payment: PaymentReceipt,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    pub(crate) fn new(id: OrderId, summary: CheckoutSummary, payment: PaymentReceipt) -> Self {
        Self {
            id,
            lines: summary.lines,
            total: summary.total,
            payment,
            placed_at: Utc::now(),
        }
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// True if the order bought a membership rather than cart items.
    pub fn is_membership(&self) -> bool {
        self.lines.iter().any(|l| l.membership.is_some())
    }
}
