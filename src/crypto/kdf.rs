//! Passphrase stretching by repeated SHA-256.
//!
//! The passphrase is hashed once, then the digest is re-hashed until
//! `KDF_ITERATIONS` rounds have run.  The final 32-byte digest is used
//! directly as the AES-256 key.
//!
//! No salt is mixed in: the same passphrase always yields the same key,
//! so two stores opened with one passphrase share a key.  Existing store
//! files depend on this exact construction, so it must not change.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Length of the derived key in bytes (SHA-256 digest = AES-256 key).
pub const KEY_LEN: usize = 32;

/// Number of hashing rounds applied to the passphrase.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Derive a 32-byte key from `passphrase`.
pub fn derive_key(passphrase: &[u8]) -> [u8; KEY_LEN] {
    let mut seed: [u8; KEY_LEN] = Sha256::digest(passphrase).into();

    for _ in 1..KDF_ITERATIONS {
        let next: [u8; KEY_LEN] = Sha256::digest(seed).into();
        seed.zeroize();
        seed = next;
    }

    seed
}
