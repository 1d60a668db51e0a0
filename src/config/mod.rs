//! Project configuration loaded from `.jsonvault.toml`.

pub mod settings;

pub use settings::Settings;
