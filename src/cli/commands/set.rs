//! `jsonvault set` — add or update a value.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{open_existing, parse_value, Cli};
use crate::errors::{Result, StoreError};

/// Execute the `set` command.
pub fn execute(cli: &Cli, key: &str, value: Option<&str>) -> Result<()> {
    // Determine the raw value from one of three sources.
    let raw = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        v.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input.
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 3: Interactive hidden prompt.
        dialoguer::Password::new()
            .with_prompt(format!("Enter value for {key}"))
            .interact()
            .map_err(|e| StoreError::CommandFailed(format!("input prompt: {e}")))?
    };

    let mut store = open_existing(cli)?;
    let parsed = parse_value(&raw);

    match cli.collection.as_deref() {
        Some(col) => {
            store.set_in(col, key, parsed)?;
            output::success(&format!("Set '{key}' in collection '{col}'"));
        }
        None => {
            store.set(key, parsed)?;
            output::success(&format!("Set '{key}'"));
        }
    }

    Ok(())
}
