//! `jsonvault remove` — remove a single key.

use crate::cli::output;
use crate::cli::{open_existing, Cli};
use crate::errors::{Result, StoreError};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, key: &str) -> Result<()> {
    let mut store = open_existing(cli)?;

    let removed = match cli.collection.as_deref() {
        Some(col) => store.remove_in(col, key)?,
        None => store.remove(key)?,
    };

    if removed.is_none() {
        return Err(StoreError::CommandFailed(format!("key '{key}' not found")));
    }

    output::success(&format!("Removed '{key}'"));
    Ok(())
}
