//! Configuration management commands.

use std::path::PathBuf;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, validate_session, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("currency", ctx.config.store.currency.code());
    ctx.output.kv("session", &ctx.config.store.session);

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output
        .kv("persist", &ctx.config.storage.persist.to_string());
    ctx.output.kv("dir", &ctx.config.storage.dir);

    ctx.output.info("");
    ctx.output.info("[payment]");
    ctx.output
        .kv("delay_ms", &ctx.config.payment.delay_ms.to_string());
    ctx.output
        .kv("decline", &ctx.config.payment.decline.to_string());

    ctx.output.info("");
    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level);
    ctx.output.kv("json", &ctx.config.log.json.to_string());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(ref config_path) = ctx.config_path else {
        bail!("No config file found. Run `storefront config init` to create one.");
    };

    let mut config = CliConfig::load(config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "currency"] => Ok(config.store.currency.code().to_string()),
        ["store", "session"] => Ok(config.store.session.clone()),
        ["storage", "persist"] => Ok(config.storage.persist.to_string()),
        ["storage", "dir"] => Ok(config.storage.dir.clone()),
        ["payment", "delay_ms"] => Ok(config.payment.delay_ms.to_string()),
        ["payment", "decline"] => Ok(config.payment.decline.to_string()),
        ["log", "level"] => Ok(config.log.level.clone()),
        ["log", "json"] => Ok(config.log.json.to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "currency"] => config.store.currency = value.parse()?,
        ["store", "session"] => {
            validate_session(value)?;
            config.store.session = value.to_string();
        }
        ["storage", "persist"] => config.storage.persist = value.parse()?,
        ["storage", "dir"] => config.storage.dir = value.to_string(),
        ["payment", "delay_ms"] => config.payment.delay_ms = value.parse()?,
        ["payment", "decline"] => config.payment.decline = value.parse()?,
        ["log", "level"] => config.log.level = value.to_string(),
        ["log", "json"] => config.log.json = value.parse()?,
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}
