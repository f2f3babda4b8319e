//! Membership plans.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::prelude::*;

use super::PlansArgs;
use crate::context::Context;
use crate::output::feature_mark;

#[derive(Serialize)]
struct PlanView<'a> {
    #[serde(flatten)]
    plan: &'a MembershipPlan,
    period: BillingPeriod,
    price: Money,
    annual_savings: Savings,
}

/// Run the plans command.
pub async fn run(args: PlansArgs, ctx: &Context) -> Result<()> {
    let plans = MembershipPlan::all(ctx.currency());

    if ctx.output.is_json() {
        let views: Vec<PlanView<'_>> = plans
            .iter()
            .map(|plan| PlanView {
                plan,
                period: args.period,
                price: plan.price(args.period),
                annual_savings: plan.annual_savings(),
            })
            .collect();
        ctx.output.json(&views);
        return Ok(());
    }

    for plan in &plans {
        let title = if plan.popular {
            format!("{} (most popular)", plan.name)
        } else {
            plan.name.clone()
        };
        ctx.output.header(&title);
        ctx.output.info(&plan.description);
        ctx.output
            .kv(args.period.as_str(), &plan.price(args.period).display());

        if args.period == BillingPeriod::Annual {
            let savings = plan.annual_savings();
            ctx.output.kv(
                "you save",
                &format!("{} ({}%)", savings.amount.display(), savings.percentage),
            );
        }

        for feature in &plan.features {
            println!("    {} {}", feature_mark(feature.included), feature.name);
        }
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "Subscribe with `storefront checkout --plan <basic|vip> --period {}`.",
        args.period
    ));

    Ok(())
}
