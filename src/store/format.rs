//! On-disk store file handling.
//!
//! A store file is a single line of text:
//!
//! ```text
//! [hex(nonce): 24 chars][hex(ciphertext + tag)]
//! ```
//!
//! Every filesystem touch of the engine goes through this module, so the
//! whole-document persistence strategy can be swapped out here without
//! changing the `Store` API.
//!
//! Writes replace the file in place.  They are not crash-atomic: a
//! failure mid-write can leave a truncated file behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::keys::DerivedKey;
use crate::errors::{Result, StoreError};

use super::document::Document;

/// Suffix of the temporary copy made during key rotation.
pub const COPY_SUFFIX: &str = ".copy";

/// Read and decrypt the document stored at `path`.
pub fn read_document(path: &Path, key: &DerivedKey) -> Result<Document> {
    let blob = read_blob(path)?;
    let plaintext = decrypt(key.as_bytes(), &blob)?;
    Document::from_slice(&plaintext)
}

/// Encrypt `doc` and overwrite the file at `path`.
pub fn write_document(path: &Path, doc: &Document, key: &DerivedKey) -> Result<()> {
    let plaintext = zeroize::Zeroizing::new(doc.to_vec()?);
    let blob = encrypt(key.as_bytes(), &plaintext)?;
    #[cfg(test)]
    faults::check_write()?;
    fs::write(path, blob)?;
    Ok(())
}

/// Read the raw blob text, mapping a missing file to `StoreNotFound`.
///
/// Trailing whitespace (an editor's final newline) is dropped.
pub fn read_blob(path: &Path) -> Result<String> {
    let mut blob = fs::read_to_string(path).map_err(|e| not_found_or_io(path, e))?;
    blob.truncate(blob.trim_end().len());
    Ok(blob)
}

/// Delete a store file, mapping a missing file to `StoreNotFound`.
pub fn remove_file(path: &Path) -> Result<()> {
    #[cfg(test)]
    faults::check_remove(path)?;
    fs::remove_file(path).map_err(|e| not_found_or_io(path, e))
}

/// Sibling path used to hold a copy of `path` during rotation.
pub fn copy_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(COPY_SUFFIX);
    PathBuf::from(name)
}

fn not_found_or_io(path: &Path, e: std::io::Error) -> StoreError {
    if e.kind() == ErrorKind::NotFound {
        StoreError::StoreNotFound(path.to_path_buf())
    } else {
        StoreError::Io(e)
    }
}

/// Per-thread failure injection for exercising error paths.
#[cfg(test)]
pub(crate) mod faults {
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::path::{Path, PathBuf};

    thread_local! {
        static FAIL_WRITES: Cell<bool> = const { Cell::new(false) };
        static FAIL_REMOVE: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
    }

    /// Make every `write_document` on this thread fail.
    pub fn fail_writes(on: bool) {
        FAIL_WRITES.with(|f| f.set(on));
    }

    /// Make `remove_file` on this thread fail for `path`.
    pub fn fail_remove(path: Option<PathBuf>) {
        FAIL_REMOVE.with(|p| *p.borrow_mut() = path);
    }

    pub(super) fn check_write() -> io::Result<()> {
        if FAIL_WRITES.with(Cell::get) {
            return Err(io::Error::new(io::ErrorKind::Other, "injected write failure"));
        }
        Ok(())
    }

    pub(super) fn check_remove(path: &Path) -> io::Result<()> {
        if FAIL_REMOVE.with(|p| p.borrow().as_deref() == Some(path)) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "injected remove failure"));
        }
        Ok(())
    }
}
