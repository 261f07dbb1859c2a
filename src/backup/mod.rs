//! Backup pipeline — fetch, aggregate, compress, seal, and the reverse.
//!
//! Store path:
//!   `list_records` → `fetch_all` → `payload::encode` → `compress` → `seal`
//!
//! Load path:
//!   `unseal` → `decompress` → document text

pub mod artifact;
pub mod compression;
pub mod fetch;
pub mod payload;
pub mod secret;

pub use fetch::{fetch_all, Fetched, Progress, DEFAULT_WORKERS};
pub use secret::SecretExtractor;

use tracing::{debug, info};

use crate::config::Settings;
use crate::crypto;
use crate::errors::{BackupError, Result};
use crate::vault::{RecordSummary, VaultClient};

/// A sealed backup, ready to be written to disk.
pub struct Backup {
    /// `nonce || ciphertext` of the compressed document.
    pub bytes: Vec<u8>,
    /// Number of items in the document.
    pub items: usize,
}

/// List the items to back up; an empty vault is an error.
pub fn list_records<C>(client: &C) -> Result<Vec<RecordSummary>>
where
    C: VaultClient + ?Sized,
{
    let records = client.list()?;
    if records.is_empty() {
        return Err(BackupError::ListingError("no items found".into()));
    }
    info!(items = records.len(), "listed vault items");
    Ok(records)
}

/// Fetch `records` and seal them under the discovered master password.
pub fn build<C, P>(
    client: &C,
    records: &[RecordSummary],
    settings: &Settings,
    progress: &P,
) -> Result<Backup>
where
    C: VaultClient + ?Sized,
    P: Progress + ?Sized,
{
    let extractor = SecretExtractor::new(settings.account_title_prefix.clone());
    let fetched = fetch_all(client, records, &extractor, settings.workers, progress)?;
    let items = fetched.contents.len();

    let document = payload::encode(&fetched.contents);
    drop(fetched.contents);

    let compressed = compression::compress(&document)?;
    drop(document);
    debug!(compressed_len = compressed.len(), "document compressed");

    let bytes = crypto::seal(&compressed, &fetched.master_secret)?;
    Ok(Backup { bytes, items })
}

/// List, fetch and seal in one go.
pub fn create<C, P>(client: &C, settings: &Settings, progress: &P) -> Result<Backup>
where
    C: VaultClient + ?Sized,
    P: Progress + ?Sized,
{
    let records = list_records(client)?;
    build(client, &records, settings, progress)
}

/// Decrypt and decompress a backup back into the document text.
pub fn open(artifact: &[u8], passphrase: &str, max_document_bytes: usize) -> Result<String> {
    let compressed = crypto::unseal(artifact, passphrase)?;
    compression::decompress(&compressed, max_document_bytes)
}
