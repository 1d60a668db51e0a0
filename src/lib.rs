pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod store;

pub use errors::{Result, StoreError};
pub use store::{Document, Store, StoreOptions, Subscription};
