//! Configuration loaded from `.op-backup.toml`.

pub mod settings;

pub use settings::Settings;
