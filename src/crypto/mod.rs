//! Cryptographic primitives for op-backup.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Passphrase padding into a 32-byte key (`keys`)

pub mod encryption;
pub mod keys;

pub use encryption::{decrypt, encrypt, seal, unseal, NONCE_LEN};
pub use keys::{derive_key, BackupKey, KEY_LEN};
