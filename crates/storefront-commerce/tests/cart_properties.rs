use std::collections::HashSet;

use proptest::prelude::*;
use storefront_commerce::prelude::*;

const PRICES: [i64; 4] = [45, 65, 55, 0];

fn product(index: usize) -> ProductDescriptor {
    ProductDescriptor::new(
        format!("p{}", index),
        format!("Product {}", index),
        PRICES[index] * 100,
        "",
    )
}

fn id(index: usize) -> ProductId {
    ProductId::new(format!("p{}", index))
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
    Update(usize, i64),
    Clear,
    SetOpen(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..PRICES.len()).prop_map(Op::Add),
        1 => (0..PRICES.len()).prop_map(Op::Remove),
        2 => (0..PRICES.len(), -3i64..8).prop_map(|(i, q)| Op::Update(i, q)),
        1 => Just(Op::Clear),
        1 => any::<bool>().prop_map(Op::SetOpen),
    ]
}

/// Straight-line reference: (index, quantity) in insertion order.
fn apply_model(model: &mut Vec<(usize, i64)>, open: &mut bool, op: &Op) {
    match *op {
        Op::Add(i) => match model.iter_mut().find(|(j, _)| *j == i) {
            Some((_, q)) => *q += 1,
            None => model.push((i, 1)),
        },
        Op::Remove(i) => model.retain(|(j, _)| *j != i),
        Op::Update(i, q) if q < 1 => model.retain(|(j, _)| *j != i),
        Op::Update(i, q) => {
            if let Some((_, existing)) = model.iter_mut().find(|(j, _)| *j == i) {
                *existing = q;
            }
        }
        Op::Clear => model.clear(),
        Op::SetOpen(o) => *open = o,
    }
}

fn apply_store(cart: &mut CartStore, op: &Op) {
    match *op {
        Op::Add(i) => cart.add_item(product(i)),
        Op::Remove(i) => {
            cart.remove_item(&id(i));
        }
        Op::Update(i, q) => {
            cart.update_quantity(&id(i), q);
        }
        Op::Clear => cart.clear_cart(),
        Op::SetOpen(o) => cart.set_open(o),
    }
}

proptest! {
    #[test]
    fn prop_store_matches_model(ops in prop::collection::vec(op(), 0..60)) {
        let mut cart = CartStore::new(Currency::SAR);
        let mut model = Vec::new();
        let mut open = false;

        for op in &ops {
            apply_store(&mut cart, op);
            apply_model(&mut model, &mut open, op);

            let actual: Vec<(String, i64)> = cart
                .items()
                .iter()
                .map(|i| (i.id.to_string(), i.quantity))
                .collect();
            let expected: Vec<(String, i64)> = model
                .iter()
                .map(|(i, q)| (format!("p{}", i), *q))
                .collect();
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(cart.is_open(), open);
        }
    }

    #[test]
    fn prop_invariants_hold_after_any_sequence(ops in prop::collection::vec(op(), 0..60)) {
        let mut cart = CartStore::new(Currency::SAR);
        for op in &ops {
            apply_store(&mut cart, op);

            let ids: HashSet<&ProductId> = cart.items().iter().map(|i| &i.id).collect();
            prop_assert_eq!(ids.len(), cart.items().len());
            prop_assert!(cart.items().iter().all(|i| i.quantity >= 1));

            let quantity: i64 = cart.items().iter().map(|i| i.quantity).sum();
            prop_assert_eq!(cart.total_items(), quantity);

            let price: i64 = cart
                .items()
                .iter()
                .map(|i| i.price * i.quantity)
                .sum();
            prop_assert_eq!(cart.total_price(), Money::new(price, Currency::SAR));
        }
    }

    #[test]
    fn prop_repeated_add_counts_calls(index in 0..PRICES.len(), times in 1usize..40) {
        let mut cart = CartStore::new(Currency::SAR);
        for _ in 0..times {
            cart.add_item(product(index));
        }
        prop_assert_eq!(cart.items().len(), 1);
        prop_assert_eq!(cart.items()[0].quantity, times as i64);
    }

    #[test]
    fn prop_clear_always_empties(ops in prop::collection::vec(op(), 0..30)) {
        let mut cart = CartStore::new(Currency::SAR);
        for op in &ops {
            apply_store(&mut cart, op);
        }
        cart.clear_cart();
        prop_assert!(cart.items().is_empty());
        prop_assert_eq!(cart.total_items(), 0);
        prop_assert_eq!(cart.total_price(), Money::zero(Currency::SAR));
    }

    #[test]
    fn prop_snapshot_restores_identically(ops in prop::collection::vec(op(), 0..30)) {
        let mut cart = CartStore::new(Currency::SAR);
        for op in &ops {
            apply_store(&mut cart, op);
        }
        let json = serde_json::to_string(&cart.snapshot()).unwrap();
        let state: CartState = serde_json::from_str(&json).unwrap();
        let restored = CartStore::restore(Currency::SAR, state);
        prop_assert_eq!(restored.snapshot(), cart.snapshot());
    }
}
