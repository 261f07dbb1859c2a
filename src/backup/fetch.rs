//! Concurrent retrieval of every listed item.
//!
//! A fixed pool of scoped worker threads pulls indices from a shared
//! cursor, fetches the item, checks it for the master password and
//! sends `(index, result)` back to the calling thread.  The caller
//! collects exactly one result per item into its index slot, so the
//! aggregate keeps listing order no matter which fetch finishes first.
//!
//! The first failure raises an abort flag: workers finish the fetch
//! they are in but take no new work.  The thread scope joins every
//! worker before `fetch_all` returns, on success and on error alike.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, OnceLock};
use std::thread;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::secret::SecretExtractor;
use crate::errors::{BackupError, Result};
use crate::vault::{RecordSummary, VaultClient};

/// Default size of the fetch pool.
pub const DEFAULT_WORKERS: usize = 10;

/// Receives one tick per completed fetch.
pub trait Progress: Sync {
    fn advance(&self);
}

impl Progress for () {
    fn advance(&self) {}
}

impl Progress for AtomicUsize {
    fn advance(&self) {
        self.fetch_add(1, Ordering::Relaxed);
    }
}

impl Progress for indicatif::ProgressBar {
    fn advance(&self) {
        self.inc(1);
    }
}

/// Everything the fetch phase produced.
pub struct Fetched {
    /// Raw item contents, in listing order.
    pub contents: Vec<String>,
    /// The account password, used as the backup passphrase.
    pub master_secret: Zeroizing<String>,
}

/// Fetch all `records` with at most `workers` concurrent requests.
pub fn fetch_all<C, P>(
    client: &C,
    records: &[RecordSummary],
    extractor: &SecretExtractor,
    workers: usize,
    progress: &P,
) -> Result<Fetched>
where
    C: VaultClient + ?Sized,
    P: Progress + ?Sized,
{
    let total = records.len();
    if total == 0 {
        return Err(BackupError::ListingError("no items found".into()));
    }

    let workers = workers.clamp(1, total);
    debug!(items = total, workers, "fetching vault items");

    let cursor = AtomicUsize::new(0);
    let abort = AtomicBool::new(false);
    let master: OnceLock<Zeroizing<String>> = OnceLock::new();

    let contents = thread::scope(|scope| -> Result<Vec<String>> {
        let (tx, rx) = mpsc::channel::<(usize, Result<String>)>();

        for n in 0..workers {
            let tx = tx.clone();
            let (cursor, abort, master) = (&cursor, &abort, &master);
            thread::Builder::new()
                .name(format!("fetch-{n}"))
                .spawn_scoped(scope, move || {
                    while !abort.load(Ordering::Relaxed) {
                        let index = cursor.fetch_add(1, Ordering::Relaxed);
                        let Some(record) = records.get(index) else {
                            break;
                        };

                        let result = fetch_one(client, extractor, record, master);
                        progress.advance();
                        if result.is_err() {
                            abort.store(true, Ordering::Relaxed);
                        }
                        if tx.send((index, result)).is_err() {
                            break;
                        }
                    }
                })
                .map_err(|e| {
                    abort.store(true, Ordering::Relaxed);
                    BackupError::CommandFailed(format!("cannot spawn fetch worker: {e}"))
                })?;
        }
        // Only the workers hold senders now; `recv` fails if they all exit early.
        drop(tx);

        collect(&rx, total, &abort)
    })?;

    let master_secret = master
        .into_inner()
        .ok_or(BackupError::MissingMasterSecret)?;

    Ok(Fetched {
        contents,
        master_secret,
    })
}

/// Fetch one item and offer it to the extractor.
fn fetch_one<C>(
    client: &C,
    extractor: &SecretExtractor,
    record: &RecordSummary,
    master: &OnceLock<Zeroizing<String>>,
) -> Result<String>
where
    C: VaultClient + ?Sized,
{
    let content = client.get(&record.id)?;

    if let Some(secret) = extractor.extract(&record.title, &content)? {
        if master.set(secret).is_ok() {
            debug!(id = %record.id, "found master password");
        } else {
            warn!(id = %record.id, "another account item carries a password, keeping the first one");
        }
    }

    Ok(content)
}

/// Block until `total` results arrived, placing each into its slot.
fn collect(
    rx: &mpsc::Receiver<(usize, Result<String>)>,
    total: usize,
    abort: &AtomicBool,
) -> Result<Vec<String>> {
    let mut slots: Vec<Option<String>> = vec![None; total];

    for _ in 0..total {
        let (index, result) = rx.recv().map_err(|_| {
            BackupError::CommandFailed("fetch workers stopped before all items arrived".into())
        })?;

        match result {
            Ok(content) => slots[index] = Some(content),
            Err(e) => {
                abort.store(true, Ordering::Relaxed);
                return Err(e);
            }
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| {
                BackupError::CommandFailed(format!("item #{index} was never fetched"))
            })
        })
        .collect()
}
