//! `jsonvault init` — create a new, empty store.

use crate::cli::output;
use crate::cli::{prompt_new_password, store_path, Cli, PASSWORD_ENV};
use crate::errors::{Result, StoreError};
use crate::store::Store;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = store_path(cli)?;

    if path.exists() {
        output::tip("Use `jsonvault set` to add values to the existing store.");
        return Err(StoreError::CommandFailed(format!(
            "store already exists at {}",
            path.display()
        )));
    }

    let password = prompt_new_password(PASSWORD_ENV)?;
    let store = Store::open(&path, &password)?;

    output::success(&format!("Store created at {}", store.path().display()));
    output::tip("Add a value: jsonvault set <KEY> <VALUE>");

    Ok(())
}
