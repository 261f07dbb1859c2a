//! `op-backup backup` — snapshot the whole vault into an encrypted file.
//!
//! The backup password is the account password found in the vault's
//! own "1Password Account" item, so the same password that unlocks
//! 1Password also opens the backup.

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};

use crate::backup::{self, artifact};
use crate::cli::{output, record_audit};
use crate::config::Settings;
use crate::errors::Result;
use crate::vault::OpCli;

/// Execute the `backup` command (also the default without a subcommand).
pub fn execute(output_dir: Option<&str>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;
    if let Some(dir) = output_dir {
        settings.output_dir = dir.to_string();
    }

    let client = OpCli::from_settings(&settings);
    let records = backup::list_records(&client)?;

    let bar = progress_bar(records.len());
    let built = backup::build(&client, &records, &settings, &bar);
    bar.finish_and_clear();
    let sealed = built?;

    let dir = settings.output_path(&cwd);
    if !dir.exists() {
        output::info(&format!("Created backup directory: {}", dir.display()));
    }
    let name = artifact::file_name(&Local::now(), &settings.extension);
    let path = artifact::write(&dir, &name, &sealed.bytes)?;

    record_audit(
        &dir,
        "backup",
        Some(&name),
        Some(&format!("{} items, {} bytes", sealed.items, sealed.bytes.len())),
    );

    output::success(&format!(
        "Backed up {} items ({})",
        sealed.items,
        output::human_size(sealed.bytes.len())
    ));
    println!("{}", path.display());
    Ok(())
}

/// Progress bar on stderr; indicatif hides it when stderr is not a TTY.
fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} fetching [{bar:30}] {pos}/{len}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
