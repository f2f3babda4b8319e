//! CLI configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::Currency;

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Longest accepted session name, in bytes.
pub const MAX_SESSION_LEN: usize = 64;

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub payment: PaymentConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if path.extension().map_or(false, |e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        validate_session(&config.store.session)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if path.extension().map_or(false, |e| e == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

/// Shop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Currency every price is shown and charged in.
    #[serde(default)]
    pub currency: Currency,

    /// Name of the cart session to load and save.
    #[serde(default = "default_session")]
    pub session: String,
}

/// Session names become part of the saved cart's file name.
pub fn validate_session(session: &str) -> Result<()> {
    if session.trim().is_empty() {
        bail!("store.session must not be empty");
    }
    if session.len() > MAX_SESSION_LEN {
        bail!(
            "store.session is {} bytes long; the limit is {}",
            session.len(),
            MAX_SESSION_LEN
        );
    }
    Ok(())
}

fn default_session() -> String {
    "default".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            session: default_session(),
        }
    }
}

/// Where carts are saved between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Save the cart after every command. When off, each command starts
    /// from an empty cart.
    #[serde(default = "default_true")]
    pub persist: bool,

    /// Directory for saved state, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: String,
}

fn default_true() -> bool {
    true
}

fn default_storage_dir() -> String {
    ".storefront".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persist: true,
            dir: default_storage_dir(),
        }
    }
}

/// Simulated payment processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// How long a charge takes.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Refuse every charge, for trying out the failure path.
    #[serde(default)]
    pub decline: bool,
}

fn default_delay_ms() -> u64 {
    2000
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            decline: false,
        }
    }
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit log lines as JSON.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Generate a commented default config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[store]
# Currency for all prices (SAR, AED, USD, EUR, GBP). Amounts are labelled
# with it, not converted. A cart saved under one currency does not load
# under another.
currency = "SAR"
# Cart session to load and save (at most 64 bytes)
session = "default"

[storage]
# Keep the cart between runs
persist = true
# Directory where carts are saved
dir = ".storefront"

[payment]
# Simulated processing time in milliseconds
delay_ms = 2000
# Set to true to make every payment fail
decline = false

[log]
# Used when RUST_LOG is not set
level = "warn"
json = false
"#
    .to_string()
}
