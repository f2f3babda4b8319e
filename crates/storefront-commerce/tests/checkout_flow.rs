use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use storefront_commerce::prelude::*;

fn sar(amount: i64) -> Money {
    Money::from_major(amount, Currency::SAR)
}

fn cart_with_two_products() -> CartStore {
    let catalog = Catalog::builtin(Currency::SAR);
    let mut cart = CartStore::new(Currency::SAR);
    for id in ["1", "2", "1"] {
        let product = catalog.get(&ProductId::new(id)).unwrap();
        cart.add_item(product.descriptor());
    }
    cart
}

fn count_clears(cart: &mut CartStore) -> Arc<AtomicUsize> {
    let clears = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&clears);
    cart.subscribe(move |event, _| {
        if *event == CartEvent::Cleared {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    clears
}

/// Gateway that records what it was asked to charge.
#[derive(Default)]
struct RecordingGateway {
    charges: std::sync::Mutex<Vec<PaymentRequest>>,
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, CommerceError> {
        self.charges.lock().unwrap().push(request.clone());
        Ok(PaymentReceipt {
            transaction_id: TransactionId::new("txn_test"),
            amount: request.amount,
            method: request.method,
        })
    }
}

#[tokio::test]
async fn cart_checkout_charges_total_and_clears_once() {
    let mut cart = cart_with_two_products();
    let clears = count_clears(&mut cart);
    let gateway = RecordingGateway::default();

    let order = Checkout::new(&gateway)
        .complete(&mut cart, CheckoutRequest::Cart, PaymentMethod::Card)
        .await
        .unwrap();

    assert_eq!(order.total, sar(155));
    assert_eq!(order.item_count(), 3);
    assert!(!order.is_membership());
    assert_eq!(order.payment.transaction_id, TransactionId::new("txn_test"));
    assert!(cart.is_empty());
    assert_eq!(clears.load(Ordering::SeqCst), 1);

    let charges = gateway.charges.lock().unwrap();
    assert_eq!(charges.len(), 1);
    assert_eq!(charges[0].amount, sar(155));
    assert_eq!(charges[0].order_id, order.id);
}

#[tokio::test]
async fn declined_payment_leaves_cart_untouched() {
    let mut cart = cart_with_two_products();
    let clears = count_clears(&mut cart);
    let before = cart.snapshot();
    let gateway = SimulatedGateway::declining(Duration::ZERO);

    let result = Checkout::new(&gateway)
        .complete(&mut cart, CheckoutRequest::Cart, PaymentMethod::PayPal)
        .await;

    assert!(matches!(result, Err(CommerceError::PaymentDeclined(_))));
    assert_eq!(cart.snapshot(), before);
    assert_eq!(clears.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_cart_cannot_check_out() {
    let mut cart = CartStore::new(Currency::SAR);
    let gateway = RecordingGateway::default();

    let result = Checkout::new(&gateway)
        .complete(&mut cart, CheckoutRequest::Cart, PaymentMethod::Card)
        .await;

    assert!(matches!(result, Err(CommerceError::EmptyCheckout)));
    assert!(gateway.charges.lock().unwrap().is_empty());
}

#[tokio::test]
async fn membership_checkout_ignores_cart() {
    let mut cart = cart_with_two_products();
    let clears = count_clears(&mut cart);
    let before = cart.snapshot();
    let gateway = SimulatedGateway::new(Duration::ZERO);

    let order = Checkout::new(&gateway)
        .complete(
            &mut cart,
            CheckoutRequest::Membership {
                tier: MembershipTier::Vip,
                period: BillingPeriod::Annual,
            },
            PaymentMethod::Card,
        )
        .await
        .unwrap();

    assert_eq!(order.total, sar(1999));
    assert_eq!(order.lines.len(), 1);
    assert_eq!(order.lines[0].id, ProductId::new("vip"));
    assert_eq!(order.lines[0].quantity, 1);
    assert!(order.is_membership());
    assert_eq!(cart.snapshot(), before);
    assert_eq!(clears.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn membership_checkout_works_with_empty_cart() {
    let mut cart = CartStore::new(Currency::SAR);
    let gateway = SimulatedGateway::new(Duration::ZERO);

    let order = Checkout::new(&gateway)
        .complete(
            &mut cart,
            CheckoutRequest::Membership {
                tier: MembershipTier::Basic,
                period: BillingPeriod::Monthly,
            },
            PaymentMethod::PayPal,
        )
        .await
        .unwrap();

    assert_eq!(order.total, sar(99));
    assert_eq!(order.payment.method, PaymentMethod::PayPal);
}

#[test]
fn summary_lists_cart_lines_in_order() {
    let cart = cart_with_two_products();
    let summary = CheckoutSummary::prepare(&cart, &CheckoutRequest::Cart).unwrap();

    let lines: Vec<(&str, i64)> = summary
        .lines
        .iter()
        .map(|l| (l.id.as_str(), l.quantity))
        .collect();
    assert_eq!(lines, vec![("1", 2), ("2", 1)]);
    assert_eq!(summary.lines[0].line_total(), sar(90));
    assert_eq!(summary.total, cart.total_price());
}

#[tokio::test]
async fn checkout_works_through_trait_object() {
    let mut cart = cart_with_two_products();
    let gateway: Box<dyn PaymentGateway> = Box::new(SimulatedGateway::new(Duration::ZERO));

    let order = Checkout::new(gateway.as_ref())
        .complete(&mut cart, CheckoutRequest::Cart, PaymentMethod::Card)
        .await
        .unwrap();

    assert_eq!(order.total, sar(155));
    assert!(cart.is_empty());
}
