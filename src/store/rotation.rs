//! Re-encrypting a store under a new passphrase.
//!
//! The live file is copied to `<path>.copy`, the copy is opened with the
//! old passphrase and dumped, the original is deleted and rewritten
//! under the new key, and only then is the copy removed.
//!
//! Between deleting the original and finishing the rewrite the copy is
//! the only intact version of the data.  A crash in that window leaves
//! it behind, still encrypted under the old passphrase.

use std::path::Path;

use crate::crypto::keys::DerivedKey;
use crate::errors::{Result, StoreError};

use super::engine::Store;
use super::format;

impl Store {
    /// Change the passphrase of this store from `old_passphrase` to
    /// `new_passphrase`.
    ///
    /// Fails with `InvalidKey` without touching anything if
    /// `old_passphrase` is not the one this store was opened with.
    /// If the rewrite fails after the original was removed, the error is
    /// `RotationFailed` and names the copy that still holds the data.
    /// While that copy exists, further rotations fail with `BackupExists`.
    pub async fn change_key(&mut self, old_passphrase: &str, new_passphrase: &str) -> Result<()> {
        if new_passphrase.is_empty() {
            return Err(StoreError::ConfigError(
                "new encryption key must not be empty".into(),
            ));
        }

        // 1. Verify the old passphrase against the live key.
        let old_key = DerivedKey::from_passphrase(old_passphrase.as_bytes());
        if !old_key.matches(&self.key) {
            tracing::warn!(path = %self.path.display(), "rotation rejected: wrong current key");
            return Err(StoreError::InvalidKey(self.path.clone()));
        }
        let new_key = DerivedKey::from_passphrase(new_passphrase.as_bytes());

        // 2. Copy the file aside.  An existing copy is a backup from an
        //    earlier failed rotation and must not be overwritten.
        let copy = format::copy_path(&self.path);
        if tokio::fs::try_exists(&copy).await? {
            tracing::warn!(backup = %copy.display(), "rotation refused: backup already present");
            return Err(StoreError::BackupExists(copy));
        }
        tokio::fs::copy(&self.path, &copy).await?;

        // 3. Read everything back through the copy.
        let dump = match Store::open(&copy, old_passphrase).and_then(|s| s.dump()) {
            Ok(doc) => doc,
            Err(e) => {
                discard_copy(&copy);
                return Err(e);
            }
        };

        // 4. Remove the original.
        if let Err(e) = self.delete() {
            discard_copy(&copy);
            return Err(e);
        }

        // 5. Rewrite under the new key.
        self.key = new_key;
        if let Err(e) = self.import(&dump) {
            tracing::error!(
                path = %self.path.display(),
                backup = %copy.display(),
                error = %e,
                "rotation rewrite failed; backup kept"
            );
            return Err(StoreError::RotationFailed {
                backup: copy,
                reason: e.to_string(),
            });
        }

        // 6. The new file is on disk and the rotation is done; a stale
        //    copy only needs a warning.
        if let Err(e) = format::remove_file(&copy) {
            tracing::warn!(copy = %copy.display(), error = %e, "could not remove rotation copy");
        }

        tracing::info!(path = %self.path.display(), "rotated store key");
        Ok(())
    }
}

fn discard_copy(copy: &Path) {
    if let Err(e) = format::remove_file(copy) {
        tracing::warn!(copy = %copy.display(), error = %e, "could not remove rotation copy");
    }
}
