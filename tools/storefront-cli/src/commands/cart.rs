//! Cart management commands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::prelude::*;

use super::{CartArgs, CartCommand};
use crate::context::Context;

#[derive(Serialize)]
struct CartView<'a> {
    session: &'a str,
    items: &'a [LineItem],
    is_open: bool,
    total_items: i64,
    total_price: Money,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let repo = ctx.repository()?;

    let command = args.command.unwrap_or(CartCommand::Show);
    if let CartCommand::Sessions = command {
        return list_sessions(&repo, ctx);
    }

    let mut cart = ctx.load_cart(&repo)?;

    let changed = Arc::new(AtomicBool::new(false));
    {
        let changed = changed.clone();
        let output = ctx.output.clone();
        cart.subscribe(move |event, _state| {
            changed.store(true, Ordering::Relaxed);
            output.debug(&format!("cart event: {:?}", event));
        });
    }

    match command {
        CartCommand::Show | CartCommand::Sessions => {}
        CartCommand::Add { id } => {
            let catalog = ctx.catalog();
            let product = catalog.require(&ProductId::new(id))?;
            cart.add_item(product.descriptor());
            let quantity = cart.get_item(&product.id).map_or(0, |item| item.quantity);
            ctx.output
                .success(&format!("Added {} (now {} in cart)", product.title, quantity));
        }
        CartCommand::Remove { id } => {
            let id = ProductId::new(id);
            if cart.remove_item(&id) {
                ctx.output.success(&format!("Removed {}", id));
            } else {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
        }
        CartCommand::Set { id, quantity } => {
            let id = ProductId::new(id);
            let present = cart.get_item(&id).is_some();
            cart.update_quantity(&id, quantity);
            if !present {
                ctx.output.warn(&format!("{} is not in the cart", id));
            } else if cart.get_item(&id).is_none() {
                ctx.output.success(&format!("Removed {}", id));
            } else {
                ctx.output
                    .success(&format!("Set {} quantity to {}", id, quantity));
            }
        }
        CartCommand::Clear => {
            cart.clear_cart();
            ctx.output.success("Cart cleared");
        }
        CartCommand::Open => cart.set_open(true),
        CartCommand::Close => cart.set_open(false),
        CartCommand::Toggle => {
            cart.toggle_open();
        }
    }

    if changed.load(Ordering::Relaxed) {
        ctx.save_cart(&repo, &cart)?;
    }

    show(&cart, ctx);
    Ok(())
}

fn show(cart: &CartStore, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            session: &ctx.config.store.session,
            items: cart.items(),
            is_open: cart.is_open(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        });
        return;
    }

    ctx.output.header(&format!(
        "Cart '{}' ({})",
        ctx.config.store.session,
        if cart.is_open() { "open" } else { "closed" }
    ));

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [4, 30, 12, 4, 14];
    ctx.output
        .table_row(&["ID", "TITLE", "PRICE", "QTY", "SUBTOTAL"], &widths);
    for item in cart.items() {
        let price = cart.unit_price(item).display();
        let quantity = item.quantity.to_string();
        let subtotal = cart.line_total(item).display();
        ctx.output.table_row(
            &[item.id.as_str(), &item.title, &price, &quantity, &subtotal],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.kv("items", &cart.total_items().to_string());
    ctx.output.kv("total", &cart.total_price().display());
}

fn list_sessions(repo: &CartRepository, ctx: &Context) -> Result<()> {
    let sessions = repo.sessions()?;

    if ctx.output.is_json() {
        ctx.output.json(&sessions);
        return Ok(());
    }

    ctx.output.header("Saved carts");
    if sessions.is_empty() {
        ctx.output.info("No saved carts.");
    }
    for session in &sessions {
        if *session == ctx.config.store.session {
            ctx.output.list_item(&format!("{} (current)", session));
        } else {
            ctx.output.list_item(session);
        }
    }
    Ok(())
}
