//! `op-backup decrypt <file>` — print the contents of a backup.

use std::path::Path;

use crate::backup::{self, artifact};
use crate::cli::{output, prompt_password, record_audit};
use crate::config::Settings;
use crate::errors::{BackupError, Result};

/// Execute the `decrypt` command.
pub fn execute(file: &str) -> Result<()> {
    if file.trim().is_empty() {
        return Err(BackupError::CommandFailed("no backup file specified".into()));
    }

    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let path = Path::new(file);

    if path.extension().and_then(|ext| ext.to_str()) != Some(settings.extension.as_str()) {
        output::warning(&format!(
            "{file} does not have the .{} extension",
            settings.extension
        ));
    }

    let sealed = artifact::read(path)?;
    let password = prompt_password()?;
    let document = backup::open(&sealed, &password, settings.max_document_bytes())?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());
    record_audit(
        &settings.output_path(&cwd),
        "decrypt",
        Some(&name),
        Some(&format!("{} bytes", document.len())),
    );

    println!("{document}");
    Ok(())
}
