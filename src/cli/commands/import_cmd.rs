//! `jsonvault import` — replace the store contents with a JSON document.
//!
//! The input must have the shape produced by `dump`:
//! `{ "version": "1", "storage": { ... } }`.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{open_existing, Cli};
use crate::errors::{Result, StoreError};
use crate::store::Document;

/// Execute the `import` command.
pub fn execute(cli: &Cli, file_path: &str) -> Result<()> {
    let source = Path::new(file_path);

    if !source.exists() {
        return Err(StoreError::CommandFailed(format!(
            "import file not found: {}",
            source.display()
        )));
    }

    // Parse before asking for the password so a bad file fails fast.
    let bytes = fs::read(source)?;
    let doc = Document::from_slice(&bytes)?;

    let mut store = open_existing(cli)?;
    store.import(&doc)?;

    output::success(&format!(
        "Imported {} top-level entr{} from {}",
        doc.storage.len(),
        if doc.storage.len() == 1 { "y" } else { "ies" },
        source.display()
    ));

    Ok(())
}
