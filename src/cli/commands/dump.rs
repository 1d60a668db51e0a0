//! `jsonvault dump` — print the decrypted document.

use std::fs;

use crate::cli::output;
use crate::cli::{open_existing, store_path, Cli};
use crate::errors::{Result, StoreError};

/// Execute the `dump` command.
pub fn execute(cli: &Cli, output_path: Option<&str>) -> Result<()> {
    let store = open_existing(cli)?;
    let doc = store.dump()?;

    let content = serde_json::to_string_pretty(&doc)
        .map_err(|e| StoreError::SerializationError(e.to_string()))?;

    match output_path {
        Some(dest) => {
            let cwd = std::env::current_dir()?;
            let dest_path = cwd.join(dest);

            // Refuse to overwrite the encrypted store with its plaintext.
            if dest_path == store_path(cli)? {
                return Err(StoreError::CommandFailed(
                    "refusing to dump over the store file".into(),
                ));
            }

            fs::write(&dest_path, format!("{content}\n")).map_err(|e| {
                StoreError::CommandFailed(format!("failed to write dump file: {e}"))
            })?;

            output::success(&format!("Dumped store to {dest}"));
            output::warning("The dump is plaintext — delete it when you are done.");
        }
        None => println!("{content}"),
    }

    Ok(())
}
