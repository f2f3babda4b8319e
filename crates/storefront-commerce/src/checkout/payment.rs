//! Payment gateway seam.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{OrderId, TransactionId};
use crate::money::Money;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit card.
    #[default]
    Card,
    PayPal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::PayPal => "paypal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit Card",
            PaymentMethod::PayPal => "PayPal",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" | "stripe" => Ok(PaymentMethod::Card),
            "paypal" => Ok(PaymentMethod::PayPal),
            _ => Err(CommerceError::unknown("payment method", s)),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A charge to be made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub order_id: OrderId,
    pub amount: Money,
    pub method: PaymentMethod,
}

/// Proof of an accepted charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub transaction_id: TransactionId,
    pub amount: Money,
    pub method: PaymentMethod,
}

/// Something that can take money.
///
/// A declined or failed charge is reported as an error; the caller must not
/// treat the order as paid.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, CommerceError>;
}

/// Gateway that approves every charge after a fixed delay, or declines every
/// charge when built with [`SimulatedGateway::declining`].
#[derive(Debug, Clone, Default)]
pub struct SimulatedGateway {
    delay: Duration,
    decline: bool,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            decline: false,
        }
    }

    pub fn declining(delay: Duration) -> Self {
        Self {
            delay,
            decline: true,
        }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, CommerceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.decline {
            return Err(CommerceError::PaymentDeclined(format!(
                "{} charge of {} for {} was refused",
                request.method.display_name(),
                request.amount,
                request.order_id
            )));
        }

        Ok(PaymentReceipt {
            transaction_id: TransactionId::generate(),
            amount: request.amount,
            method: request.method,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn request() -> PaymentRequest {
        PaymentRequest {
            order_id: OrderId::new("ord_1"),
            amount: Money::from_major(110, Currency::SAR),
            method: PaymentMethod::PayPal,
        }
    }

    #[tokio::test]
    async fn test_simulated_gateway_approves() {
        let receipt = SimulatedGateway::default().charge(&request()).await.unwrap();
        assert_eq!(receipt.amount, Money::from_major(110, Currency::SAR));
        assert_eq!(receipt.method, PaymentMethod::PayPal);
    }

    #[tokio::test]
    async fn test_simulated_gateway_declines() {
        let result = SimulatedGateway::declining(Duration::ZERO)
            .charge(&request())
            .await;
        assert!(matches!(result, Err(CommerceError::PaymentDeclined(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_waits() {
        let start = tokio::time::Instant::now();
        SimulatedGateway::new(Duration::from_secs(2))
            .charge(&request())
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[test]
    fn test_parse_payment_method() {
        assert_eq!("stripe".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!("PayPal".parse::<PaymentMethod>().unwrap(), PaymentMethod::PayPal);
        assert!("cash".parse::<PaymentMethod>().is_err());
    }
}
