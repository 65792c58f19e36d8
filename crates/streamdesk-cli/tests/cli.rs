use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

const BINARY_NAME: &str = "streamdesk";

/// Nothing listens here, so any accidental network call fails fast.
const UNREACHABLE_API: &str = "http://127.0.0.1:9/api/v1";

fn session_file(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("session.json")
}

fn streamdesk(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--session-file")
        .arg(session_file(dir))
        .arg("--api-url")
        .arg(UNREACHABLE_API)
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env("XDG_CACHE_HOME", dir.path().join("cache"))
        .env_remove("RUST_LOG");
    cmd
}

/// A session file whose tokens never expire during the test.
fn write_session(dir: &tempfile::TempDir) {
    let expires = "2999-01-01T00:00:00Z";
    let body = format!(
        r#"{{"access":{{"value":"access-1","expires_at":"{expires}"}},"refresh":{{"value":"refresh-1","expires_at":"{expires}"}}}}"#
    );
    fs::write(session_file(dir), body).unwrap();
}

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Admin console for the livestream gifting platform"))
        .stdout(contains("transactions"));
}

#[test]
fn status_without_session_reports_signed_out() {
    let tmp = tempfile::tempdir().unwrap();
    streamdesk(&tmp)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Not signed in"));
}

#[test]
fn status_reads_session_file() {
    let tmp = tempfile::tempdir().unwrap();
    write_session(&tmp);

    streamdesk(&tmp)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Signed in"))
        .stdout(contains("expires in"));
}

#[test]
/// Logout command should delete the session file.
fn logout_deletes_session_file() {
    let tmp = tempfile::tempdir().unwrap();
    write_session(&tmp);
    assert!(session_file(&tmp).exists());

    streamdesk(&tmp)
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Signed out"));

    assert!(!session_file(&tmp).exists());
}

#[test]
/// Forgetting with no remembered email still signs out cleanly.
fn logout_forget_without_remembered_password() {
    let tmp = tempfile::tempdir().unwrap();
    write_session(&tmp);

    streamdesk(&tmp)
        .args(["logout", "--forget"])
        .assert()
        .success()
        .stdout(contains("Signed out"))
        .stdout(contains("No remembered password to forget"));

    assert!(!session_file(&tmp).exists());
}

#[test]
fn area_command_without_session_asks_to_sign_in() {
    let tmp = tempfile::tempdir().unwrap();
    streamdesk(&tmp)
        .args(["users", "list", "--param", "page=1"])
        .assert()
        .failure()
        .stderr(contains("streamdesk login").and(contains("expired").not()));
}

#[test]
fn invalid_param_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    streamdesk(&tmp)
        .args(["wallet", "topups", "--param", "status"])
        .assert()
        .failure()
        .stderr(contains("KEY=VALUE"));
}
