//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use storefront_cache::Cache;
use storefront_commerce::prelude::*;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file, or the nearest one found
    /// from the working directory upwards.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match Self::find_config(&cwd)? {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find the nearest config file in the directory tree.
    ///
    /// The first file found is the one used; if it cannot be read or parsed
    /// that is an error rather than a silent fall back to defaults.
    fn find_config(start: &Path) -> Result<Option<(CliConfig, PathBuf)>> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    let config = CliConfig::load(&config_path)?;
                    return Ok(Some((config, config_path)));
                }
            }

            if !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// The shop currency.
    pub fn currency(&self) -> Currency {
        self.config.store.currency
    }

    /// The product list, priced in the shop currency.
    pub fn catalog(&self) -> Catalog {
        Catalog::builtin(self.currency())
    }

    /// Cart storage for this run. Without persistence every command sees a
    /// fresh in-memory store.
    pub fn repository(&self) -> Result<CartRepository> {
        let cache = if self.config.storage.persist {
            let dir = self.resolve_path(&self.config.storage.dir);
            Cache::open(&dir)
                .with_context(|| format!("Failed to open storage directory: {}", dir.display()))?
        } else {
            Cache::in_memory()
        };
        Ok(CartRepository::new(cache))
    }

    /// Load the configured session's cart.
    pub fn load_cart(&self, repo: &CartRepository) -> Result<CartStore> {
        let session = &self.config.store.session;
        let cart = match repo.load(session, self.currency()) {
            Ok(cart) => cart,
            Err(e @ CommerceError::SavedCartCurrency { .. }) => anyhow::bail!(
                "{}. Set `store.currency` back, or use another `store.session`; the saved cart was not changed.",
                e
            ),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to load cart for session '{}'", session))
            }
        };
        self.output.debug(&format!(
            "Loaded cart '{}' with {} line(s)",
            session,
            cart.unique_item_count()
        ));
        Ok(cart)
    }

    /// Save the configured session's cart.
    pub fn save_cart(&self, repo: &CartRepository, cart: &CartStore) -> Result<()> {
        let session = &self.config.store.session;
        repo.save(session, cart)
            .with_context(|| format!("Failed to save cart for session '{}'", session))
    }

    /// The payment gateway described by the `[payment]` section.
    pub fn gateway(&self) -> SimulatedGateway {
        let delay = Duration::from_millis(self.config.payment.delay_ms);
        if self.config.payment.decline {
            SimulatedGateway::declining(delay)
        } else {
            SimulatedGateway::new(delay)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path, config: CliConfig) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let mut config = CliConfig::default();
        config.store.session = "outer".to_string();
        config.save(&dir.path().join("storefront.toml")).unwrap();

        let (found, path) = Context::find_config(&nested).unwrap().unwrap();
        assert_eq!(found.store.session, "outer");
        assert_eq!(path, dir.path().join("storefront.toml"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join("storefront.toml"),
            "[payment]\ndecline = tru\n",
        )
        .unwrap();

        let err = Context::find_config(&nested).unwrap_err();
        assert!(format!("{:#}", err).contains("storefront.toml"));
    }

    #[test]
    fn test_currency_switch_keeps_saved_cart() {
        let dir = tempfile::tempdir().unwrap();
        let sar = context_in(dir.path(), CliConfig::default());
        {
            let repo = sar.repository().unwrap();
            let mut cart = sar.load_cart(&repo).unwrap();
            for id in ["1", "2"] {
                cart.add_item(sar.catalog().require(&ProductId::new(id)).unwrap().descriptor());
            }
            sar.save_cart(&repo, &cart).unwrap();
        }

        let mut config = CliConfig::default();
        config.store.currency = Currency::USD;
        let usd = context_in(dir.path(), config);
        let repo = usd.repository().unwrap();
        let err = usd.load_cart(&repo).unwrap_err();
        assert!(err.to_string().contains("priced in SAR"));

        let repo = sar.repository().unwrap();
        let cart = sar.load_cart(&repo).unwrap();
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), Money::from_major(110, Currency::SAR));
    }

    #[test]
    fn test_cart_survives_between_commands() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), CliConfig::default());
        let product = ctx.catalog().require(&ProductId::new("4")).unwrap().descriptor();

        {
            let repo = ctx.repository().unwrap();
            let mut cart = ctx.load_cart(&repo).unwrap();
            cart.add_item(product);
            ctx.save_cart(&repo, &cart).unwrap();
        }

        let repo = ctx.repository().unwrap();
        let cart = ctx.load_cart(&repo).unwrap();
        assert_eq!(cart.total_items(), 1);
        assert!(dir.path().join(".storefront").is_dir());
    }

    #[test]
    fn test_without_persistence_nothing_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.persist = false;
        let ctx = context_in(dir.path(), config);

        let repo = ctx.repository().unwrap();
        let mut cart = ctx.load_cart(&repo).unwrap();
        cart.set_open(true);
        ctx.save_cart(&repo, &cart).unwrap();

        assert!(!dir.path().join(".storefront").exists());
        let fresh = ctx.repository().unwrap();
        assert!(!ctx.load_cart(&fresh).unwrap().is_open());
    }
}
