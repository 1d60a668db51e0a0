//! Ownership of the derived store key.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::kdf::{derive_key, KEY_LEN};

/// A wrapper around the 32-byte store key that automatically zeroes
/// its memory when dropped.
///
/// Deliberately has no `Debug` or `Clone` so the key cannot leak
/// into logs or be copied around.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new `DerivedKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Stretch `passphrase` into a key.
    pub fn from_passphrase(passphrase: &[u8]) -> Self {
        let mut bytes = derive_key(passphrase);
        let key = Self::new(bytes);
        bytes.zeroize();
        key
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Compare two keys without leaking timing information.
    pub fn matches(&self, other: &DerivedKey) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}
