use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in JsonVault.
#[derive(Debug, Error)]
pub enum StoreError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Authentication-tag verification failed.  A wrong key and a
    /// corrupted file are deliberately reported the same way.
    #[error("Decryption failed — wrong password or corrupted data")]
    DecryptionFailed,

    // --- Store errors ---
    #[error("Invalid encryption key for {0}")]
    InvalidKey(PathBuf),

    #[error("Store not found at {0}")]
    StoreNotFound(PathBuf),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Key rotation failed after the original was removed: {reason} (backup kept at {backup})")]
    RotationFailed { backup: PathBuf, reason: String },

    #[error("A rotation backup already exists at {0}; restore or remove it before rotating again")]
    BackupExists(PathBuf),

    // --- Config errors ---
    #[error("Config error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for JsonVault results.
pub type Result<T> = std::result::Result<T, StoreError>;
