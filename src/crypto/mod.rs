//! Cryptographic primitives for JsonVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption into hex blobs (`encryption`)
//! - Iterated SHA-256 passphrase stretching (`kdf`)
//! - The zeroize-on-drop `DerivedKey` holder (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_key, KDF_ITERATIONS, KEY_LEN};
pub use keys::DerivedKey;
