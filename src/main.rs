use clap::Parser;
use opbackup::cli::{output, Cli, Commands};
use opbackup::errors::BackupError;

fn main() {
    let cli = Cli::parse();
    opbackup::cli::init_tracing(cli.verbose);

    let result = match cli.command {
        None => opbackup::cli::commands::backup::execute(None),
        Some(Commands::Backup { ref output_dir }) => {
            opbackup::cli::commands::backup::execute(output_dir.as_deref())
        }
        Some(Commands::Other(ref args)) => {
            tracing::debug!(?args, "unrecognised arguments, taking a backup");
            opbackup::cli::commands::backup::execute(None)
        }
        Some(Commands::Decrypt { ref file }) => opbackup::cli::commands::decrypt::execute(file),
        #[cfg(feature = "audit-log")]
        Some(Commands::Audit { last, ref since }) => {
            opbackup::cli::commands::audit_cmd::execute(last, since.as_deref())
        }
        #[cfg(not(feature = "audit-log"))]
        Some(Commands::Audit { .. }) => Err(BackupError::AuditError(
            "this build has no audit log (enable the `audit-log` feature)".into(),
        )),
        Some(Commands::Completions { shell }) => {
            opbackup::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        match e {
            BackupError::MissingMasterSecret => output::tip(
                "The password is read from the \"1Password Account\" item; check that `op` can see it.",
            ),
            BackupError::AuthenticationFailed => {
                output::tip("Use the 1Password master password that was current when the backup was taken.")
            }
            _ => {}
        }
        std::process::exit(1);
    }
}
