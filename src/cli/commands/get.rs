//! `jsonvault get` — print a single value.

use crate::cli::{open_existing, Cli};
use crate::errors::{Result, StoreError};

/// Execute the `get` command.
pub fn execute(cli: &Cli, key: &str) -> Result<()> {
    let store = open_existing(cli)?;

    let value = match cli.collection.as_deref() {
        Some(col) => store.get_in(col, key)?,
        None => store.get(key)?,
    };

    match value {
        // Strings print raw so they can be used in shell substitutions.
        Some(serde_json::Value::String(s)) => println!("{s}"),
        Some(other) => println!(
            "{}",
            serde_json::to_string_pretty(&other)
                .map_err(|e| StoreError::SerializationError(e.to_string()))?
        ),
        None => {
            return Err(StoreError::CommandFailed(format!("key '{key}' not found")));
        }
    }

    Ok(())
}
