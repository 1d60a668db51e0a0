//! The plaintext document held inside a store file.
//!
//! ```json
//! { "version": "1", "storage": { "<key>": <value>, "<collection>": { "<key>": <value> } } }
//! ```
//!
//! Keys directly under `storage` form the default collection.  A named
//! collection is an object nested under `storage`, so collection names
//! and bare keys share one namespace and must not collide.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, StoreError};

/// Current document format tag.
pub const CURRENT_VERSION: &str = "1";

/// Versioned envelope around the key/value storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Format tag, kept for forward compatibility.
    pub version: String,

    /// Default-collection keys and named collections.
    pub storage: Map<String, Value>,

    /// Any other top-level fields, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            storage: Map::new(),
            extra: Map::new(),
        }
    }
}

impl Document {
    /// Parse decrypted plaintext into a document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::MalformedDocument(e.to_string()))
    }

    /// Serialize to compact JSON bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StoreError::SerializationError(e.to_string()))
    }

    /// Look up a value in the default collection or in `collection`.
    ///
    /// Returns `None` when the key or the collection does not exist, or
    /// when `collection` names something that is not an object.
    pub fn get(&self, collection: Option<&str>, key: &str) -> Option<&Value> {
        match collection {
            Some(col) => self.storage.get(col)?.as_object()?.get(key),
            None => self.storage.get(key),
        }
    }

    /// Insert or replace a value, creating the collection if needed.
    pub fn set(&mut self, collection: Option<&str>, key: &str, value: Value) -> Result<()> {
        validate_name("key", key)?;
        match collection {
            Some(col) => {
                validate_name("collection", col)?;
                let entry = self
                    .storage
                    .entry(col.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                let map = entry.as_object_mut().ok_or_else(|| {
                    StoreError::InvalidArgument(format!(
                        "'{col}' holds a plain value and cannot be used as a collection"
                    ))
                })?;
                map.insert(key.to_string(), value);
            }
            None => {
                self.storage.insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    /// Remove a value, returning it if it existed.
    ///
    /// An emptied collection is left in place as `{}`.
    pub fn remove(&mut self, collection: Option<&str>, key: &str) -> Option<Value> {
        match collection {
            Some(col) => self.storage.get_mut(col)?.as_object_mut()?.remove(key),
            None => self.storage.remove(key),
        }
    }

    /// Sorted keys of the default collection or of `collection`.
    pub fn keys(&self, collection: Option<&str>) -> Vec<String> {
        let map = match collection {
            Some(col) => match self.storage.get(col).and_then(Value::as_object) {
                Some(map) => map,
                None => return Vec::new(),
            },
            None => &self.storage,
        };
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Reject empty collection names and keys.
pub(crate) fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StoreError::InvalidArgument(format!("{kind} cannot be empty")));
    }
    Ok(())
}
