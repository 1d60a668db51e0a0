//! `jsonvault check` — verify a password against the store.

use crate::cli::output;
use crate::cli::{prompt_password, store_path, Cli};
use crate::errors::{Result, StoreError};
use crate::store::Store;

/// Execute the `check` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = store_path(cli)?;

    if !path.exists() {
        output::info(&format!("No store at {} — any password can create one.", path.display()));
        return Ok(());
    }

    let password = prompt_password()?;

    if Store::check_key(&path, &password)? {
        output::success("Password is correct.");
        Ok(())
    } else {
        Err(StoreError::InvalidKey(path))
    }
}
