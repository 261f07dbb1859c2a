use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{BackupError, Result};

/// Project-level configuration, loaded from `.op-backup.toml`.
///
/// Every field has a sensible default so op-backup works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Executable used to talk to the vault (default: `op`).
    #[serde(default = "default_op_binary")]
    pub op_binary: String,

    /// Account shorthand or sign-in address passed as `--account`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Number of concurrent item fetches.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Directory where backup files are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File extension of backup files, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Title prefix of the item that holds the account password.
    #[serde(default = "default_account_title_prefix")]
    pub account_title_prefix: String,

    /// Upper bound on the decompressed document size, in MiB.
    #[serde(default = "default_max_document_mib")]
    pub max_document_mib: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_op_binary() -> String {
    "op".to_string()
}

fn default_workers() -> usize {
    crate::backup::DEFAULT_WORKERS
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_extension() -> String {
    "op_backup".to_string()
}

fn default_account_title_prefix() -> String {
    "1Password Account".to_string()
}

fn default_max_document_mib() -> usize {
    256
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            op_binary: default_op_binary(),
            account: None,
            workers: default_workers(),
            output_dir: default_output_dir(),
            extension: default_extension(),
            account_title_prefix: default_account_title_prefix(),
            max_document_mib: default_max_document_mib(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    pub const FILE_NAME: &'static str = ".op-backup.toml";

    /// Load settings from `<project_dir>/.op-backup.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed or holds invalid
    /// values, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            BackupError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the backup pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.op_binary.trim().is_empty() {
            return Err(BackupError::ConfigError("op_binary cannot be empty".into()));
        }
        if self.workers == 0 {
            return Err(BackupError::ConfigError(
                "workers must be at least 1".into(),
            ));
        }
        if self.extension.is_empty()
            || self.extension.starts_with('.')
            || self.extension.contains(['/', '\\'])
        {
            return Err(BackupError::ConfigError(format!(
                "extension '{}' is invalid — use a bare extension like 'op_backup'",
                self.extension
            )));
        }
        if self.account_title_prefix.is_empty() {
            return Err(BackupError::ConfigError(
                "account_title_prefix cannot be empty".into(),
            ));
        }
        if self.max_document_mib == 0 {
            return Err(BackupError::ConfigError(
                "max_document_mib must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the output directory against the project directory.
    pub fn output_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.output_dir)
    }

    /// Decompression bound in bytes.
    pub fn max_document_bytes(&self) -> usize {
        self.max_document_mib.saturating_mul(1024 * 1024)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
