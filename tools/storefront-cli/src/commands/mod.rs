//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod courses;
pub mod plans;

use clap::{Args, Subcommand};
use storefront_commerce::prelude::*;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only products for this age group (0-3, 3-6, 6-9, 9-12).
    #[arg(short, long)]
    pub age: Option<AgeGroup>,

    /// Only products of this kind (printable, book).
    #[arg(short, long)]
    pub kind: Option<ProductKind>,
}

/// Arguments for the plans command.
#[derive(Args)]
pub struct PlansArgs {
    /// Billing period to show prices for.
    #[arg(short, long, default_value = "monthly")]
    pub period: BillingPeriod,
}

/// Arguments for the courses command.
#[derive(Args)]
pub struct CoursesArgs {
    /// Show one course and its lessons.
    #[arg(long, conflicts_with = "level")]
    pub id: Option<String>,

    /// Only courses at this level (beginner, intermediate, advanced).
    #[arg(short, long)]
    pub level: Option<CourseLevel>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart contents and totals.
    Show,
    /// Add one of a catalog product.
    Add {
        /// Product ID.
        id: String,
    },
    /// Remove a product line entirely.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set the quantity of a product line. Zero or less removes it.
    Set {
        /// Product ID.
        id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
    /// Mark the cart panel open.
    Open,
    /// Mark the cart panel closed.
    Close,
    /// Flip the cart panel.
    Toggle,
    /// List sessions with a saved cart.
    Sessions,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Buy a membership plan instead of the cart contents.
    #[arg(long, requires = "period")]
    pub plan: Option<MembershipTier>,

    /// Billing period for the membership plan.
    #[arg(long, requires = "plan")]
    pub period: Option<BillingPeriod>,

    /// Payment method (card, paypal).
    #[arg(short, long, default_value = "card")]
    pub method: PaymentMethod,

    /// Show the order summary without paying.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
