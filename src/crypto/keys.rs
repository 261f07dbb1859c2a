//! Passphrase-to-key derivation.
//!
//! The backup key is the passphrase itself, padded to the AES-256 key
//! length.  A passphrase of `n < 32` bytes is extended with `32 - n`
//! copies of the byte `32 - n` (PKCS#7 style, but against the key
//! length instead of a block size).  Passphrases of exactly 32 bytes
//! are used unchanged; longer ones are rejected.
//!
//! The pad is not injective: `"abc"` and `"abc"` followed by
//! twenty-nine `0x1d` bytes derive the same key.  Existing backups
//! depend on this exact rule, so it is kept as is.

use zeroize::Zeroize;

use crate::errors::{BackupError, Result};

/// Length of the AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// A 32-byte backup key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct BackupKey {
    bytes: [u8; KEY_LEN],
}

impl BackupKey {
    /// Access the raw key bytes (e.g. to build the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Derive the backup key from a passphrase using the pad rule.
pub fn derive_key(passphrase: &str) -> Result<BackupKey> {
    let raw = passphrase.as_bytes();
    if raw.len() > KEY_LEN {
        return Err(BackupError::PassphraseTooLong { len: raw.len() });
    }

    let needed = KEY_LEN - raw.len();
    // `needed` is at most 32, so the cast is lossless.
    let mut bytes = [needed as u8; KEY_LEN];
    bytes[..raw.len()].copy_from_slice(raw);

    Ok(BackupKey { bytes })
}
