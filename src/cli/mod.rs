//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, StoreError};
use crate::store::Store;

/// Minimum length enforced when choosing a new password.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable holding the store password (CI/CD, scripts).
pub const PASSWORD_ENV: &str = "JSONVAULT_PASSWORD";

/// Environment variable holding the new password for `rotate-key`.
pub const NEW_PASSWORD_ENV: &str = "JSONVAULT_NEW_PASSWORD";

/// JsonVault CLI: encrypted JSON key-value store.
#[derive(Parser)]
#[command(
    name = "jsonvault",
    about = "Encrypted JSON key-value store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store file (default: `store_path` from .jsonvault.toml, or store.json)
    #[arg(short, long, global = true)]
    pub path: Option<String>,

    /// Collection to operate on (default: the unnamed collection)
    #[arg(short, long, global = true)]
    pub collection: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty store
    Init,

    /// Print a value
    Get {
        /// Key to read
        key: String,
    },

    /// Set a value (parsed as JSON, otherwise stored as a string)
    Set {
        /// Key to write
        key: String,
        /// Value (omit to read from stdin or prompt)
        value: Option<String>,
    },

    /// Remove a key
    Remove {
        /// Key to remove
        key: String,
    },

    /// List keys
    List,

    /// Print the decrypted document as JSON
    Dump {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Replace the store contents with a JSON document
    Import {
        /// Path to a file produced by `dump`
        file: String,
    },

    /// Delete the store file
    Delete {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Re-encrypt the store under a new password
    RotateKey,

    /// Check whether the password opens the store
    Check,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the store password, trying in order:
/// 1. `JSONVAULT_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter store password")
        .interact()
        .map_err(|e| StoreError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `init` and
/// `rotate-key`).
///
/// `env_var` is checked first for scripted usage.  Enforces a minimum
/// password length.
pub fn prompt_new_password(env_var: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(env_var) {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(StoreError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose store password")
            .with_confirmation(
                "Confirm store password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| StoreError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Resolve the store file from `--path` or the project settings.
pub fn store_path(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    match &cli.path {
        Some(path) => Ok(cwd.join(path)),
        None => Ok(Settings::load(&cwd)?.store_path(&cwd)),
    }
}

/// Open an existing store, prompting for its password.
///
/// Unlike `Store::open`, a missing file is an error here so that a typo
/// in `--path` does not silently create a new store.
pub fn open_existing(cli: &Cli) -> Result<Store> {
    let path = store_path(cli)?;
    if !path.exists() {
        return Err(StoreError::StoreNotFound(path));
    }
    let password = prompt_password()?;
    Store::open(&path, &password)
}

/// Interpret a command-line value as JSON, falling back to a plain string.
///
/// `42` becomes a number, `{"a":1}` an object, `hello` the string "hello".
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_value_reads_json() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value(r#"{"a":[1,2]}"#), json!({ "a": [1, 2] }));
        assert_eq!(parse_value(r#""quoted""#), json!("quoted"));
    }

    #[test]
    fn parse_value_falls_back_to_string() {
        assert_eq!(parse_value("hello world"), json!("hello world"));
        assert_eq!(parse_value("{broken"), json!("{broken"));
    }

    #[test]
    fn cli_parses_collection_flag() {
        let cli = Cli::try_parse_from(["jsonvault", "--collection", "db", "get", "url"]).unwrap();
        assert_eq!(cli.collection.as_deref(), Some("db"));
        assert!(matches!(cli.command, Commands::Get { ref key } if key == "url"));
    }
}
