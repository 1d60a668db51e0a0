//! Command implementations, one module per subcommand.

pub mod check;
pub mod completions;
pub mod delete;
pub mod dump;
pub mod get;
pub mod import_cmd;
pub mod init;
pub mod list;
pub mod remove;
pub mod rotate;
pub mod set;
