//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;
use serde_json::Value;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Short type description of a stored value, without revealing it.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(_) => "boolean".into(),
        Value::Number(_) => "number".into(),
        Value::String(s) => format!("string ({} chars)", s.chars().count()),
        Value::Array(items) => format!("array ({} items)", items.len()),
        Value::Object(map) => format!("collection ({} keys)", map.len()),
    }
}

/// Print a table of keys and value types.
pub fn print_entries_table(entries: &[(String, String)]) {
    if entries.is_empty() {
        info("Nothing stored here yet.");
        tip("Run `jsonvault set <KEY> <VALUE>` to add your first value.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Type"]);

    for (key, kind) in entries {
        table.add_row(vec![key.clone(), kind.clone()]);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn describe_hides_values() {
        assert_eq!(describe(&json!("secret")), "string (6 chars)");
        assert_eq!(describe(&json!({ "a": 1, "b": 2 })), "collection (2 keys)");
        assert_eq!(describe(&json!([1])), "array (1 items)");
        assert_eq!(describe(&json!(3.5)), "number");
    }
}
