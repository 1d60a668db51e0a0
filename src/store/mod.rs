//! Store module — the encrypted persistence engine.
//!
//! This module provides:
//! - The plaintext `Document` model (`document`)
//! - Store file reading and writing (`format`)
//! - The high-level `Store` handle (`engine`)
//! - Change subscriptions (`changes`)
//! - Passphrase rotation (`rotation`)

pub mod changes;
pub mod document;
pub mod engine;
pub mod format;
mod rotation;

// Re-export the most commonly used items.
pub use changes::{ChangeTracker, Subscription};
pub use document::{Document, CURRENT_VERSION};
pub use engine::{Store, StoreOptions, DEFAULT_PATH};
