use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while creating or opening a backup.
#[derive(Debug, Error)]
pub enum BackupError {
    // --- Vault client errors ---
    #[error("Listing vault items failed: {0}")]
    ListingError(String),

    #[error("Fetching item '{id}' failed: {reason}")]
    FetchError { id: String, reason: String },

    #[error("Account item '{title}' is malformed: {reason}")]
    MalformedRecord { title: String, reason: String },

    #[error("No master password found among the vault items")]
    MissingMasterSecret,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong password or corrupted backup")]
    AuthenticationFailed,

    #[error("Password is {len} bytes long, at most 32 bytes are supported")]
    PassphraseTooLong { len: usize },

    // --- Format errors ---
    #[error("Invalid backup file: {0}")]
    InvalidArtifact(String),

    #[error("Invalid backup payload: {0}")]
    InvalidPayload(String),

    // --- Artifact file errors ---
    #[error("Backup file already exists at {0}")]
    ArtifactExists(PathBuf),

    #[error("Backup file not found at {0}")]
    ArtifactNotFound(PathBuf),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for backup results.
pub type Result<T> = std::result::Result<T, BackupError>;
