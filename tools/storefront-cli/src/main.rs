//! Storefront CLI - browse the shop, manage a cart and check out.
//!
//! Commands:
//! - `storefront catalog` - List shop products
//! - `storefront plans` - Show membership plans
//! - `storefront courses` - Show training courses and lesson progress
//! - `storefront cart` - Show or change the cart
//! - `storefront checkout` - Pay for the cart or a membership
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs, CoursesArgs, PlansArgs};
use config::LogConfig;

/// Storefront CLI - educational printables, books and memberships
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List shop products
    Catalog(CatalogArgs),

    /// Show membership plans
    Plans(PlansArgs),

    /// Show training courses
    Courses(CoursesArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// Pay for the cart or a membership plan
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Log to stderr. `RUST_LOG` wins over the configured level.
fn init_tracing(log: &LogConfig, verbose: bool) {
    let default_level = if verbose { "debug" } else { log.level.as_str() };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if log.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("failed to initialize logging: {}", e);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_tracing(&ctx.config.log, cli.verbose);
    tracing::debug!(session = %ctx.config.store.session, currency = %ctx.config.store.currency, "starting");

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Plans(args) => commands::plans::run(args, &ctx).await,
        Commands::Courses(args) => commands::courses::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
