//! Checkout command.

use anyhow::{Context as _, Result};
use storefront_commerce::prelude::*;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let request = match (args.plan, args.period) {
        (Some(tier), Some(period)) => CheckoutRequest::Membership { tier, period },
        _ => CheckoutRequest::Cart,
    };

    let repo = ctx.repository()?;
    let mut cart = ctx.load_cart(&repo)?;

    let summary = match CheckoutSummary::prepare(&cart, &request) {
        Ok(summary) => summary,
        Err(CommerceError::EmptyCheckout) => {
            anyhow::bail!("Your cart is empty. Add products with `storefront cart add <ID>`.")
        }
        Err(e) => return Err(e.into()),
    };

    print_summary(&summary, args.method, ctx);

    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(&summary);
        } else {
            ctx.output.info("Dry run, nothing was charged.");
        }
        return Ok(());
    }

    let gateway = ctx.gateway();
    let spinner = ctx
        .output
        .spinner(&format!("Processing {} payment...", args.method.display_name()));
    let result = Checkout::new(&gateway)
        .complete(&mut cart, request, args.method)
        .await;
    spinner.finish_and_clear();

    let order = result.context("Checkout failed, your cart was not changed")?;

    if request == CheckoutRequest::Cart {
        ctx.save_cart(&repo, &cart)?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.success(&format!(
        "Payment of {} accepted",
        order.total.display()
    ));
    ctx.output.kv("order", order.id.as_str());
    ctx.output
        .kv("transaction", order.payment.transaction_id.as_str());
    ctx.output.kv(
        "placed at",
        &order.placed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    if order.is_membership() {
        ctx.output.info("Your membership is now active.");
    } else {
        ctx.output.info(&format!(
            "{} item(s) are ready to download.",
            order.item_count()
        ));
    }

    Ok(())
}

fn print_summary(summary: &CheckoutSummary, method: PaymentMethod, ctx: &Context) {
    ctx.output.header("Order summary");

    let widths = [36, 4, 14];
    for line in &summary.lines {
        let quantity = format!("x{}", line.quantity);
        let total = line.line_total().display();
        ctx.output
            .table_row(&[&line.title, &quantity, &total], &widths);
    }

    ctx.output.info("");
    ctx.output.kv("total", &summary.total.display());
    ctx.output.kv("payment", method.display_name());
}
