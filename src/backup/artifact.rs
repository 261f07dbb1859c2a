//! Backup files on disk.
//!
//! Files are named after their creation time
//! (`YYYY-MM-DD_HH-MM-SS.<ext>`, local time) and written owner-only.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::errors::{BackupError, Result};

/// Timestamp layout used in backup file names.
const NAME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Build the file name for a backup taken at `at`.
pub fn file_name(at: &DateTime<Local>, extension: &str) -> String {
    format!("{}.{extension}", at.format(NAME_FORMAT))
}

/// Write `bytes` as a new backup file in `dir` and return its path.
///
/// The bytes go to a temp file in the same directory first and are
/// then renamed into place, so a reader never sees a partial backup.
/// An existing backup with the same name is never replaced.
pub fn write(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let path = dir.join(name);
    if path.exists() {
        return Err(BackupError::ArtifactExists(path));
    }

    let tmp_path = dir.join(format!(".{name}.tmp"));
    let written = write_owner_only(&tmp_path, bytes).and_then(|()| fs::rename(&tmp_path, &path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(path)
}

/// Create `path` readable by the owner only and fill it with `bytes`.
fn write_owner_only(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Read a backup file.
pub fn read(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(BackupError::ArtifactNotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}
