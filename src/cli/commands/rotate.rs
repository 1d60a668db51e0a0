//! `jsonvault rotate-key` — change the store password.
//!
//! Verifies the current password, then re-encrypts the whole document
//! under the new one.

use crate::cli::output;
use crate::cli::{prompt_new_password, prompt_password, store_path, Cli, NEW_PASSWORD_ENV};
use crate::errors::{Result, StoreError};
use crate::store::Store;

/// Execute the `rotate-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = store_path(cli)?;
    if !path.exists() {
        return Err(StoreError::StoreNotFound(path));
    }

    // 1. Open the store with the current password.
    output::info("Enter your current store password.");
    let old_password = prompt_password()?;
    let mut store = Store::open(&path, &old_password)?;

    // 2. Prompt for the new password.
    output::info("Choose your new store password.");
    let new_password = prompt_new_password(NEW_PASSWORD_ENV)?;

    // 3. Rotate.  The copy step is the only async operation, so a
    //    single-threaded runtime is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(store.change_key(&old_password, &new_password))?;

    output::success(&format!("Password rotated for {}", store.path().display()));

    Ok(())
}
