//! Persistent key-value storage for the `products` and `cart` records.
//!
//! [`KeyValueStore`] is the raw string contract (the browser's local storage,
//! scoped per origin). [`PersistentStore`] adds JSON encoding on top. There is
//! no schema validation and no atomicity across keys: each record is written
//! on its own.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Key holding the serialized catalog.
pub const PRODUCTS_KEY: &str = "products";

/// Key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Errors from the persistent store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("Stored value for {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Raw string storage.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if never written or removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be modified.
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory storage. Contents are lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Directory-backed storage scoped to one origin.
///
/// Layout: `<root>/<origin-slug>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) the storage directory for `origin`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(root: impl AsRef<Path>, origin: &str) -> Result<Self, StoreError> {
        let dir = root.as_ref().join(origin_slug(origin));
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    /// Directory holding this origin's records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        std::fs::write(&tmp, value).map_err(io_err)?;
        std::fs::rename(&tmp, &path).map_err(io_err)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// Storage that reads as empty and rejects every write.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ReadOnlyStore;

#[cfg(test)]
impl KeyValueStore for ReadOnlyStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set_item(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io {
            key: key.to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only store"),
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.set_item(key, "")
    }
}

/// Reduce an origin to a single path component,
/// e.g. `http://localhost:8080` -> `http_localhost_8080`.
fn origin_slug(origin: &str) -> String {
    let mut slug = String::with_capacity(origin.len());
    for c in origin.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "default".to_string()
    } else {
        slug.to_string()
    }
}

/// Remove both storefront records without reading them.
///
/// # Errors
///
/// Returns `StoreError` if the backing store cannot be modified.
pub fn clear_records<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.remove_item(PRODUCTS_KEY)?;
    store.remove_item(CART_KEY)
}

/// JSON-encoded records over a [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct PersistentStore<S> {
    inner: S,
}

impl<S: KeyValueStore> PersistentStore<S> {
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Load the record under `key`, or `T::default()` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the stored text does not parse as `T`.
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, StoreError> {
        let Some(raw) = self.inner.get_item(key)? else {
            debug!(key, "No stored value, using default");
            return Ok(T::default());
        };
        debug!(key, bytes = raw.len(), "Loaded stored value");
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })
    }

    /// Serialize `value` and overwrite the record under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or the write fails.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.inner.set_item(key, &raw)?;
        debug!(key, bytes = raw.len(), "Saved value");
        Ok(())
    }

    /// Remove the record under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store cannot be modified.
    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.remove_item(key)
    }

    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}
