//! Type-safe key-value store for persisting storefront state.
//!
//! Values are stored as JSON. Two backends are available: an in-memory map
//! for tests and short-lived sessions, and a directory on disk where every
//! key is one file.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{cache_key, Cache};
//!
//! let cache = Cache::in_memory();
//! let key = cache_key!("cart", "session-1");
//!
//! cache.set(&key, &vec![1, 2, 3]).unwrap();
//! let value: Option<Vec<i32>> = cache.get(&key).unwrap();
//! assert_eq!(value, Some(vec![1, 2, 3]));
//!
//! cache.delete(&key).unwrap();
//! assert!(!cache.exists(&key).unwrap());
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cache_key, Cache, CacheError};
}
