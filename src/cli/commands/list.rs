//! `jsonvault list` — display the keys of a collection in a table.

use crate::cli::output;
use crate::cli::{open_existing, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = open_existing(cli)?;
    let doc = store.dump()?;
    let collection = cli.collection.as_deref();

    let entries: Vec<_> = doc
        .keys(collection)
        .into_iter()
        .filter_map(|key| {
            let value = doc.get(collection, &key)?;
            Some((key, output::describe(value)))
        })
        .collect();

    let label = collection.unwrap_or("default");
    output::info(&format!("{label} collection — {} key(s)", entries.len()));
    output::print_entries_table(&entries);

    Ok(())
}
