//! Browse the shop catalog.

use anyhow::Result;
use storefront_commerce::prelude::*;

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let mut filter = CatalogFilter::all();
    if let Some(age) = args.age {
        filter = filter.with_age_group(age);
    }
    if let Some(kind) = args.kind {
        filter = filter.with_kind(kind);
    }

    let products = catalog.filter(&filter);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Shop");

    if products.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    let widths = [4, 30, 18, 6, 14];
    ctx.output
        .table_row(&["ID", "TITLE", "KIND", "AGES", "PRICE"], &widths);
    for product in &products {
        let price = product.price.display();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.title,
                product.kind.display_name(),
                product.age_group.as_str(),
                &price,
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "{} of {} products. Add one with `storefront cart add <ID>`.",
        products.len(),
        catalog.len()
    ));

    Ok(())
}
