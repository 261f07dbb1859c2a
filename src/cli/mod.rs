//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::Path;

use clap::Parser;
use zeroize::Zeroizing;

use crate::errors::{BackupError, Result};

/// Environment variable that supplies the password non-interactively.
pub const PASSWORD_ENV: &str = "OP_BACKUP_PASSWORD";

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "OP_BACKUP_LOG";

/// op-backup CLI: encrypted backups of a 1Password vault.
///
/// Running without a subcommand, or with a word that is not one,
/// takes a backup.
#[derive(Parser)]
#[command(
    name = "op-backup",
    about = "Encrypted backups of a 1Password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Back up every vault item into an encrypted file (the default)
    Backup {
        /// Directory for the backup file (overrides output_dir in .op-backup.toml)
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Decrypt a backup file and print its contents
    Decrypt {
        /// Path to the backup file
        file: String,
    },

    /// View the history of backups and decrypts
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Any other word: take a backup, ignoring the arguments
    #[command(external_subcommand)]
    Other(Vec<String>),
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the backup password, trying in order:
/// 1. `OP_BACKUP_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt without echo
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter 1Password master password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| BackupError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Record an operation in the audit log when the feature is compiled in.
pub fn record_audit(dir: &Path, op: &str, artifact: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    crate::audit::log_audit(dir, op, artifact, details);

    #[cfg(not(feature = "audit-log"))]
    let _ = (dir, op, artifact, details);
}

/// Install the `tracing` subscriber, writing to stderr.
///
/// `OP_BACKUP_LOG` takes precedence; otherwise `-v` selects the level.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("opbackup={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
