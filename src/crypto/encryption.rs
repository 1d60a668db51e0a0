//! AES-256-GCM authenticated encryption into a hex text blob.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce.  The
//! nonce and the ciphertext are hex-encoded and concatenated, so the
//! whole blob can be written to a text file as-is.
//!
//! Layout of the returned string:
//!   [ 24 hex chars: nonce | hex(ciphertext + 16-byte auth tag) ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use crate::errors::{StoreError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Number of hex characters the nonce occupies at the start of a blob.
const NONCE_HEX_LEN: usize = NONCE_LEN * 2;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns `hex(nonce) + hex(ciphertext)`.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<String> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| StoreError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Never reuse a nonce under the same key.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| StoreError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut blob = String::with_capacity(NONCE_HEX_LEN + ciphertext.len() * 2);
    blob.push_str(&hex::encode(nonce));
    blob.push_str(&hex::encode(ciphertext));
    Ok(blob)
}

/// Decrypt a blob produced by `encrypt`.
///
/// Any malformed input or tag mismatch yields `DecryptionFailed`; the
/// caller cannot tell a wrong key from a damaged file.
pub fn decrypt(key: &[u8], blob: &str) -> Result<Zeroizing<Vec<u8>>> {
    if blob.len() < NONCE_HEX_LEN + TAG_LEN * 2 || !blob.is_char_boundary(NONCE_HEX_LEN) {
        return Err(StoreError::DecryptionFailed);
    }

    let (nonce_hex, ciphertext_hex) = blob.split_at(NONCE_HEX_LEN);
    let nonce_bytes = hex::decode(nonce_hex).map_err(|_| StoreError::DecryptionFailed)?;
    let ciphertext = hex::decode(ciphertext_hex).map_err(|_| StoreError::DecryptionFailed)?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| StoreError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext.as_slice())
        .map_err(|_| StoreError::DecryptionFailed)?;

    Ok(Zeroizing::new(plaintext))
}
