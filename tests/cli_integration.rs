//! Integration tests for the op-backup CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The password prompt is bypassed with `OP_BACKUP_PASSWORD`, and on
//! Unix a small shell script stands in for the `op` executable.

use std::fs;

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

use opbackup::backup::compression::compress;
use opbackup::crypto::seal;

/// Helper: get a Command pointing at the op-backup binary.
fn op_backup() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("op-backup").expect("binary should exist");
    cmd.env_remove("OP_BACKUP_PASSWORD").env_remove("OP_BACKUP_LOG");
    cmd
}

/// Helper: write a sealed backup of `document` into `dir`.
fn write_backup(dir: &TempDir, name: &str, document: &str, password: &str) -> std::path::PathBuf {
    let sealed = seal(&compress(document).unwrap(), password).unwrap();
    let path = dir.path().join(name);
    fs::write(&path, sealed).unwrap();
    path
}

#[test]
fn help_flag_shows_usage() {
    op_backup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted backups of a 1Password vault"))
        .stdout(predicate::str::contains("backup"))
        .stdout(predicate::str::contains("decrypt"))
        .stdout(predicate::str::contains("audit"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag_shows_version() {
    op_backup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("op-backup"));
}

#[test]
fn decrypt_without_file_fails() {
    op_backup()
        .arg("decrypt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn decrypt_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    op_backup()
        .args(["decrypt", "nope.op_backup"])
        .current_dir(tmp.path())
        .env("OP_BACKUP_PASSWORD", "pw")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn decrypt_prints_document() {
    let tmp = TempDir::new().unwrap();
    let document = "[\n{\"id\":\"a1\",\"title\":\"Email\"}\n]";
    write_backup(&tmp, "2024-01-01_00-00-00.op_backup", document, "hunter2");

    op_backup()
        .args(["decrypt", "2024-01-01_00-00-00.op_backup"])
        .current_dir(tmp.path())
        .env("OP_BACKUP_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{document}\n")));
}

#[test]
fn decrypt_with_wrong_password_fails() {
    let tmp = TempDir::new().unwrap();
    write_backup(&tmp, "b.op_backup", "[\n{}\n]", "hunter2");

    op_backup()
        .args(["decrypt", "b.op_backup"])
        .current_dir(tmp.path())
        .env("OP_BACKUP_PASSWORD", "hunter3")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("wrong password"));
}

#[cfg(feature = "audit-log")]
#[test]
fn decrypt_is_recorded_in_audit_log() {
    let tmp = TempDir::new().unwrap();
    write_backup(&tmp, "c.op_backup", "[\n{}\n]", "pw");

    op_backup()
        .args(["decrypt", "c.op_backup"])
        .current_dir(tmp.path())
        .env("OP_BACKUP_PASSWORD", "pw")
        .assert()
        .success();

    op_backup()
        .arg("audit")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("decrypt"))
        .stdout(predicate::str::contains("c.op_backup"));
}

#[test]
fn completions_print_a_script() {
    op_backup()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("op-backup"));
}

#[test]
fn invalid_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".op-backup.toml"), "workers = 0\n").unwrap();

    op_backup()
        .arg("backup")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("workers"));
}

// ---------------------------------------------------------------------------
// Backup against a fake `op`
// ---------------------------------------------------------------------------

#[cfg(unix)]
mod fake_op {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    const WITH_ACCOUNT: &str = r#"#!/bin/sh
if [ "$1 $2" = "item list" ]; then
  echo '[{"id":"a1","title":"Email"},{"id":"b2","title":"1Password Account (Jane)"},{"id":"c3","title":"Bank"}]'
elif [ "$1 $2" = "item get" ]; then
  case "$3" in
    a1) echo '{"id":"a1","title":"Email"}' ;;
    b2) echo '{"id":"b2","fields":[{"id":"password","value":"pw-from-vault"}]}' ;;
    c3) echo '{"id":"c3","title":"Bank"}' ;;
    *) echo "\"$3\" isn't an item" >&2; exit 1 ;;
  esac
else
  exit 2
fi
"#;

    const WITHOUT_ACCOUNT: &str = r#"#!/bin/sh
if [ "$1 $2" = "item list" ]; then
  echo '[{"id":"a1","title":"Email"}]'
else
  echo '{"id":"a1","title":"Email"}'
fi
"#;

    const EMPTY: &str = "#!/bin/sh\necho '[]'\n";

    const SIGNED_OUT: &str =
        "#!/bin/sh\necho '[ERROR] You are not currently signed in.' >&2\nexit 1\n";

    /// Install `script` as the vault CLI for a project rooted at `dir`.
    fn install(dir: &Path, script: &str) {
        let bin = dir.join("fake-op");
        fs::write(&bin, script).unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

        let config = format!(
            "op_binary = \"{}\"\noutput_dir = \"backups\"\nworkers = 2\n",
            bin.display()
        );
        fs::write(dir.join(".op-backup.toml"), config).unwrap();
    }

    #[test]
    fn backup_then_decrypt_roundtrip() {
        let tmp = TempDir::new().unwrap();
        install(tmp.path(), WITH_ACCOUNT);

        op_backup()
            .current_dir(tmp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(".op_backup"))
            .stderr(predicate::str::contains("Backed up 3 items"));

        let backups: Vec<_> = fs::read_dir(tmp.path().join("backups"))
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "op_backup"))
            .collect();
        assert_eq!(backups.len(), 1);

        let output = op_backup()
            .args(["decrypt", backups[0].to_str().unwrap()])
            .current_dir(tmp.path())
            .env("OP_BACKUP_PASSWORD", "pw-from-vault")
            .output()
            .unwrap();
        assert!(output.status.success());

        let document = String::from_utf8(output.stdout).unwrap();
        let items: Vec<serde_json::Value> = serde_json::from_str(document.trim_end()).unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["a1", "b2", "c3"]);
    }

    #[test]
    fn unknown_word_takes_a_backup() {
        let tmp = TempDir::new().unwrap();
        install(tmp.path(), WITH_ACCOUNT);

        op_backup()
            .arg("now")
            .current_dir(tmp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(".op_backup"));
        assert!(tmp.path().join("backups").is_dir());
    }

    #[test]
    fn backup_without_account_item_fails() {
        let tmp = TempDir::new().unwrap();
        install(tmp.path(), WITHOUT_ACCOUNT);

        op_backup()
            .arg("backup")
            .current_dir(tmp.path())
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("No master password"));
        assert!(!tmp.path().join("backups").exists());
    }

    #[test]
    fn backup_of_empty_vault_fails() {
        let tmp = TempDir::new().unwrap();
        install(tmp.path(), EMPTY);

        op_backup()
            .current_dir(tmp.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("no items found"));
    }

    #[test]
    fn signed_out_cli_error_is_surfaced() {
        let tmp = TempDir::new().unwrap();
        install(tmp.path(), SIGNED_OUT);

        op_backup()
            .current_dir(tmp.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("not currently signed in"));
    }

    #[test]
    fn output_dir_flag_overrides_config() {
        let tmp = TempDir::new().unwrap();
        install(tmp.path(), WITH_ACCOUNT);

        op_backup()
            .args(["backup", "--output-dir", "elsewhere"])
            .current_dir(tmp.path())
            .assert()
            .success();

        assert!(tmp.path().join("elsewhere").is_dir());
        assert!(!tmp.path().join("backups").exists());
    }
}
