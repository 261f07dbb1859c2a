//! `VaultClient` backed by the 1Password CLI (`op`).
//!
//! Every call spawns `op` and captures its stdout.  A non-zero exit
//! status is an error carrying the trimmed stderr, so the user sees the
//! CLI's own explanation (e.g. "you are not currently signed in").

use std::process::{Command, Output};

use tracing::debug;

use super::item::RecordSummary;
use super::VaultClient;
use crate::config::Settings;
use crate::errors::{BackupError, Result};

/// Drives the `op` executable.
#[derive(Debug, Clone)]
pub struct OpCli {
    binary: String,
    account: Option<String>,
}

impl OpCli {
    pub fn new(binary: impl Into<String>, account: Option<String>) -> Self {
        Self {
            binary: binary.into(),
            account,
        }
    }

    /// Build a client from the configured binary and account.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.op_binary.clone(), settings.account.clone())
    }

    /// Run `op` with `args` (plus `--account` when configured).
    fn run(&self, args: &[&str]) -> std::result::Result<String, String> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);
        if let Some(account) = &self.account {
            cmd.args(["--account", account]);
        }

        let output = cmd
            .output()
            .map_err(|e| format!("cannot run '{}': {e}", self.binary))?;
        check_status(&output)?;

        String::from_utf8(output.stdout).map_err(|_| "output is not valid UTF-8".to_string())
    }
}

impl VaultClient for OpCli {
    fn list(&self) -> Result<Vec<RecordSummary>> {
        debug!(binary = %self.binary, "listing vault items");
        let out = self
            .run(&["item", "list", "--format=json"])
            .map_err(BackupError::ListingError)?;
        parse_listing(&out)
    }

    fn get(&self, id: &str) -> Result<String> {
        let out = self
            .run(&["item", "get", id, "--format=json"])
            .map_err(|reason| BackupError::FetchError {
                id: id.to_string(),
                reason,
            })?;

        if out.trim().is_empty() {
            return Err(BackupError::FetchError {
                id: id.to_string(),
                reason: "empty output".into(),
            });
        }
        Ok(out)
    }
}

fn check_status(output: &Output) -> std::result::Result<(), String> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    let status = match output.status.code() {
        Some(code) => format!("exited with code {code}"),
        None => "terminated by signal".to_string(),
    };
    if stderr.is_empty() {
        Err(status)
    } else {
        Err(format!("{status}: {stderr}"))
    }
}

/// Parse the JSON produced by `op item list --format=json`.
///
/// An empty listing is not an error here; the caller decides.
pub fn parse_listing(json: &str) -> Result<Vec<RecordSummary>> {
    serde_json::from_str(json)
        .map_err(|e| BackupError::ListingError(format!("unexpected item list format: {e}")))
}
