//! `jsonvault delete` — remove the store file.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_existing, store_path, Cli};
use crate::errors::{Result, StoreError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let path = store_path(cli)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete store {}? This cannot be undone.", path.display()))
            .default(false)
            .interact()
            .map_err(|e| StoreError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    // Require the password so a store can only be deleted by its owner.
    let store = open_existing(cli)?;
    store.delete()?;

    output::success(&format!("Deleted store {}", path.display()));
    Ok(())
}
