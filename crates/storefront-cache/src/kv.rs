//! Key-Value store wrapper with automatic serialization.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{de::DeserializeOwned, Serialize};

use crate::CacheError;

const FILE_EXTENSION: &str = "json";

/// Longest key accepted, in bytes. Its base64 file name plus extension stays
/// under the usual 255 byte file name limit.
pub const MAX_KEY_LEN: usize = 180;

/// Type-safe cache with JSON serialization.
///
/// Works with any type that implements `Serialize` and `DeserializeOwned`.
#[derive(Debug)]
pub struct Cache {
    backend: Backend,
}

#[derive(Debug)]
enum Backend {
    Memory(Mutex<BTreeMap<String, Vec<u8>>>),
    Directory(PathBuf),
}

impl Cache {
    /// Create an empty cache that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(BTreeMap::new())),
        }
    }

    /// Open a cache stored in `dir`, creating the directory if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".storefront/state")?;
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        if !dir.is_dir() {
            return Err(CacheError::OpenError(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        tracing::debug!(dir = %dir.display(), "opened cache directory");
        Ok(Self {
            backend: Backend::Directory(dir.to_path_buf()),
        })
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        check_key(key)?;
        let bytes = serde_json::to_vec(value)?;
        match &self.backend {
            Backend::Memory(map) => {
                lock(map)?.insert(key.to_string(), bytes);
            }
            Backend::Directory(dir) => {
                let path = entry_path(dir, key);
                // Write then rename so a crash never leaves a half-written entry.
                let tmp = path.with_extension("tmp");
                fs::write(&tmp, &bytes)?;
                fs::rename(&tmp, &path)?;
            }
        }
        Ok(())
    }

    /// Delete a value from the cache. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        check_key(key)?;
        match &self.backend {
            Backend::Memory(map) => {
                lock(map)?.remove(key);
                Ok(())
            }
            Backend::Directory(dir) => match fs::remove_file(entry_path(dir, key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        check_key(key)?;
        match &self.backend {
            Backend::Memory(map) => Ok(lock(map)?.contains_key(key)),
            Backend::Directory(dir) => Ok(entry_path(dir, key).is_file()),
        }
    }

    /// Get all keys in the cache, sorted.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        match &self.backend {
            Backend::Memory(map) => Ok(lock(map)?.keys().cloned().collect()),
            Backend::Directory(dir) => {
                let mut keys = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let path = entry?.path();
                    if path.extension().map_or(true, |e| e != FILE_EXTENSION) {
                        continue;
                    }
                    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    // Files we did not write are skipped rather than reported.
                    if let Some(key) = decode_key(stem) {
                        keys.push(key);
                    }
                }
                keys.sort();
                Ok(keys)
            }
        }
    }

    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        check_key(key)?;
        match &self.backend {
            Backend::Memory(map) => Ok(lock(map)?.get(key).cloned()),
            Backend::Directory(dir) => match fs::read(entry_path(dir, key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
        }
    }
}

fn lock(
    map: &Mutex<BTreeMap<String, Vec<u8>>>,
) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>, CacheError> {
    map.lock()
        .map_err(|_| CacheError::StoreError("memory store lock poisoned".to_string()))
}

/// Keys are limited the same way on every backend.
fn check_key(key: &str) -> Result<(), CacheError> {
    if key.len() > MAX_KEY_LEN {
        return Err(CacheError::KeyTooLong {
            len: key.len(),
            max: MAX_KEY_LEN,
        });
    }
    Ok(())
}

fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.{}", URL_SAFE_NO_PAD.encode(key), FILE_EXTENSION))
}

fn decode_key(stem: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(stem).ok()?;
    String::from_utf8(bytes).ok()
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// use storefront_cache::cache_key;
///
/// let key = cache_key!("cart", "user123");
/// assert_eq!(key, "cart:user123");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        count: u32,
    }

    fn entry() -> Entry {
        Entry {
            name: "cart".to_string(),
            count: 3,
        }
    }

    #[test]
    fn test_memory_set_get_delete() {
        let cache = Cache::in_memory();
        assert_eq!(cache.get::<Entry>("missing").unwrap(), None);

        cache.set("a", &entry()).unwrap();
        assert!(cache.exists("a").unwrap());
        assert_eq!(cache.get::<Entry>("a").unwrap(), Some(entry()));

        cache.delete("a").unwrap();
        assert!(!cache.exists("a").unwrap());
        cache.delete("a").unwrap();
    }

    #[test]
    fn test_directory_round_trip_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = Cache::open(dir.path()).unwrap();
            cache.set("cart:session/1", &entry()).unwrap();
        }
        let cache = Cache::open(dir.path()).unwrap();
        assert_eq!(cache.get::<Entry>("cart:session/1").unwrap(), Some(entry()));
        assert_eq!(cache.keys().unwrap(), vec!["cart:session/1".to_string()]);
    }

    #[test]
    fn test_directory_keys_skip_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path()).unwrap();
        cache.set("b", &1).unwrap();
        cache.set("a", &2).unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::write(dir.path().join("!!!.json"), "{}").unwrap();

        assert_eq!(cache.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_directory_delete_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path()).unwrap();
        cache.delete("nothing-here").unwrap();
    }

    #[test]
    fn test_corrupt_entry_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path()).unwrap();
        fs::write(entry_path(dir.path(), "bad"), "not json").unwrap();

        let result = cache.get::<Entry>("bad");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_open_rejects_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain-file");
        fs::write(&file, "x").unwrap();

        assert!(matches!(Cache::open(&file), Err(CacheError::OpenError(_))));
    }

    #[test]
    fn test_long_keys_are_rejected_on_every_backend() {
        let dir = tempfile::tempdir().unwrap();
        let longest = "k".repeat(MAX_KEY_LEN);
        let too_long = "k".repeat(MAX_KEY_LEN + 1);

        for cache in [Cache::in_memory(), Cache::open(dir.path()).unwrap()] {
            cache.set(&longest, &entry()).unwrap();
            assert_eq!(cache.get::<Entry>(&longest).unwrap(), Some(entry()));

            assert!(matches!(
                cache.set(&too_long, &entry()),
                Err(CacheError::KeyTooLong { len, max: MAX_KEY_LEN }) if len == MAX_KEY_LEN + 1
            ));
            assert!(cache.get::<Entry>(&too_long).is_err());
            assert!(cache.exists(&too_long).is_err());
            assert!(cache.delete(&too_long).is_err());
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("cart", "abc"), "cart:abc");
        assert_eq!(cache_key!("order", "abc", 7), "order:abc:7");
    }
}
