//! Vault module — access to the password manager being backed up.
//!
//! This module provides:
//! - `RecordSummary` and item field types (`item`)
//! - The `VaultClient` seam and its `op` CLI implementation (`op`)

pub mod item;
pub mod op;

pub use item::{ItemField, ItemFields, RecordSummary};
pub use op::OpCli;

use crate::errors::Result;

/// Lists and fetches vault items.
///
/// Implementations are shared across fetch workers, hence `Sync`.
pub trait VaultClient: Sync {
    /// Every item that should end up in the backup.
    fn list(&self) -> Result<Vec<RecordSummary>>;

    /// Full JSON content of one item, verbatim.
    fn get(&self, id: &str) -> Result<String>;
}
