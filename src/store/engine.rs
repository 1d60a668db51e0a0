//! High-level store operations.
//!
//! `Store` ties the key derivation, the codec and the document model
//! together so callers can work with simple method calls like
//! `store.set_in("db", "url", "postgres://...")`.
//!
//! Every operation reads the whole file and every mutation rewrites it.
//! Two `Store` instances on the same file do not see each other's
//! writes coherently, and interleaved read-modify-write cycles can lose
//! updates; callers must serialize access themselves.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use zeroize::Zeroizing;

use crate::crypto::keys::DerivedKey;
use crate::errors::{Result, StoreError};

use super::changes::{ChangeTracker, Subscription};
use super::document::{validate_name, Document};
use super::format;

/// Default store file name, relative to the working directory.
pub const DEFAULT_PATH: &str = "store.json";

/// Construction parameters for a `Store`.
pub struct StoreOptions {
    /// Backing file (default: `store.json`).
    pub path: PathBuf,

    /// Passphrase the key is derived from.  Must not be empty.
    pub key: Zeroizing<String>,
}

impl StoreOptions {
    /// Options for `key` at the default path.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            key: Zeroizing::new(key.into()),
        }
    }

    /// Use `path` as the backing file.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

/// The main store handle.  Create one with `Store::open` or
/// `Store::with_options`, then use its methods to read and write values.
pub struct Store {
    /// Absolute path to the backing file.
    pub(super) path: PathBuf,

    /// The derived key (zeroized on drop, never exposed).
    pub(super) key: DerivedKey,

    /// Subscriptions registered through `on_did_change`.
    changes: ChangeTracker,
}

impl Store {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the store at `path`, creating it if it does not exist.
    pub fn open(path: impl AsRef<Path>, passphrase: &str) -> Result<Self> {
        Self::with_options(StoreOptions::new(passphrase).path(path.as_ref()))
    }

    /// Open a store from explicit options.
    ///
    /// An existing file must decrypt under the derived key, otherwise
    /// `InvalidKey` is returned.  A missing file is created holding an
    /// empty document.
    pub fn with_options(options: StoreOptions) -> Result<Self> {
        if options.key.is_empty() {
            return Err(StoreError::ConfigError(
                "encryption key must not be empty".into(),
            ));
        }

        let path = absolute(&options.path)?;
        let key = DerivedKey::from_passphrase(options.key.as_bytes());

        let store = Self {
            path,
            key,
            changes: ChangeTracker::new(),
        };

        if store.path.exists() {
            match store.read() {
                Ok(_) => {}
                Err(StoreError::DecryptionFailed) => {
                    tracing::warn!(path = %store.path.display(), "key check failed");
                    return Err(StoreError::InvalidKey(store.path.clone()));
                }
                Err(e) => return Err(e),
            }
            tracing::debug!(path = %store.path.display(), "opened store");
        } else {
            if let Some(parent) = store.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            format::write_document(&store.path, &Document::default(), &store.key)?;
            tracing::info!(path = %store.path.display(), "created store");
        }

        Ok(store)
    }

    /// Check whether `passphrase` opens the file at `path`.
    ///
    /// Returns `true` when the file does not exist (any passphrase may
    /// create it) or when it decrypts, `false` on authentication failure.
    pub fn check_key(path: impl AsRef<Path>, passphrase: &str) -> Result<bool> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(true);
        }

        let key = DerivedKey::from_passphrase(passphrase.as_bytes());
        let blob = format::read_blob(path)?;
        match crate::crypto::decrypt(key.as_bytes(), &blob) {
            Ok(_) => Ok(true),
            Err(StoreError::DecryptionFailed) => Ok(false),
            Err(e) => Err(e),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Value of `key` in the default collection.
    ///
    /// A named collection can be read whole this way: `get("col")`
    /// returns the collection object.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read()?.get(None, key).cloned())
    }

    /// Value of `key` in `collection`.
    pub fn get_in(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        Ok(self.read()?.get(Some(collection), key).cloned())
    }

    /// Sorted keys of the default collection, or of `collection`.
    pub fn keys(&self, collection: Option<&str>) -> Result<Vec<String>> {
        Ok(self.read()?.keys(collection))
    }

    /// The whole decrypted document.
    pub fn dump(&self) -> Result<Document> {
        self.read()
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Set `key` in the default collection.
    pub fn set<V: Serialize>(&mut self, key: &str, value: V) -> Result<()> {
        self.update(None, key, value)
    }

    /// Set `key` in `collection`, creating the collection if needed.
    pub fn set_in<V: Serialize>(&mut self, collection: &str, key: &str, value: V) -> Result<()> {
        self.update(Some(collection), key, value)
    }

    /// Remove `key` from the default collection, returning the old value.
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>> {
        self.take(None, key)
    }

    /// Remove `key` from `collection`, returning the old value.
    pub fn remove_in(&mut self, collection: &str, key: &str) -> Result<Option<Value>> {
        self.take(Some(collection), key)
    }

    /// Replace the file contents with `doc`, encrypted under the
    /// current key.  The existing file is not read first.
    pub fn import(&mut self, doc: &Document) -> Result<()> {
        self.write(doc)
    }

    /// Remove the backing file.
    pub fn delete(&self) -> Result<()> {
        format::remove_file(&self.path)?;
        tracing::info!(path = %self.path.display(), "deleted store");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Change notification
    // ------------------------------------------------------------------

    /// Call `callback(new, old)` whenever a write changes the value of
    /// `key` (in `collection`, or the default collection when `None`).
    ///
    /// The current value is captured now; unchanged writes are ignored.
    pub fn on_did_change<F>(
        &self,
        collection: Option<&str>,
        key: &str,
        callback: F,
    ) -> Result<Subscription>
    where
        F: FnMut(Option<&Value>, Option<&Value>) + Send + 'static,
    {
        validate_name("key", key)?;
        if let Some(col) = collection {
            validate_name("collection", col)?;
        }

        let current = self.read()?.get(collection, key).cloned();
        Ok(self.changes.subscribe(collection, key, current, callback))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the absolute path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn read(&self) -> Result<Document> {
        format::read_document(&self.path, &self.key)
    }

    /// Persist `doc` and let subscribers compare against it.
    pub(super) fn write(&mut self, doc: &Document) -> Result<()> {
        format::write_document(&self.path, doc, &self.key)?;
        tracing::debug!(path = %self.path.display(), "wrote store");
        self.changes.notify(doc);
        Ok(())
    }

    fn update<V: Serialize>(&mut self, collection: Option<&str>, key: &str, value: V) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| StoreError::SerializationError(format!("value for '{key}': {e}")))?;

        let mut doc = self.read()?;
        doc.set(collection, key, value)?;
        self.write(&doc)
    }

    fn take(&mut self, collection: Option<&str>, key: &str) -> Result<Option<Value>> {
        let mut doc = self.read()?;
        let removed = doc.remove(collection, key);
        if removed.is_some() {
            self.write(&doc)?;
        }
        Ok(removed)
    }
}

/// Resolve `path` against the working directory.
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(StoreError::ConfigError("store path must not be empty".into()));
    }
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
