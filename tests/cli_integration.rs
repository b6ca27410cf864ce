//! Integration tests for the credkeep CLI.
//!
//! These exercise the binary end-to-end with `assert_cmd`. The vault
//! password comes from the `CREDKEEP_PASSWORD` env var so nothing
//! prompts; every test gets its own temp directory as both cwd and
//! data dir. Each invocation is a fresh process, which also exercises
//! open → reconcile → operate on every step.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "integration-test-pw";

/// Helper: a credkeep Command rooted in `dir` with the password set.
fn credkeep(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credkeep").expect("binary should exist");
    cmd.current_dir(dir.path());
    cmd.env("CREDKEEP_PASSWORD", PASSWORD);
    // Keep Argon2 light for tests via config file written by setup().
    cmd
}

/// Write a config with cheap KDF params so tests don't pay 64 MB of
/// Argon2 per process.
fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".credkeep.toml"),
        "argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n",
    )
    .unwrap();
    dir
}

#[test]
fn help_flag_shows_usage() {
    let dir = setup();
    credkeep(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Credential store and report launcher",
        ))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("rename"))
        .stdout(predicate::str::contains("reconcile"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn version_flag_shows_name() {
    let dir = setup();
    credkeep(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("credkeep"));
}

#[test]
fn no_args_shows_usage_error() {
    let dir = setup();
    credkeep(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn set_then_get_roundtrips() {
    let dir = setup();

    credkeep(&dir)
        .args(["set", "MSOC_CATAPULT_KEY", "ck-secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added"));

    credkeep(&dir)
        .args(["get", "MSOC_CATAPULT_KEY"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ck-secret"));
}

#[test]
fn list_needs_no_password() {
    let dir = setup();

    credkeep(&dir)
        .args(["set", "SOME_KEY", "v"])
        .assert()
        .success();

    // No CREDKEEP_PASSWORD: the plain listing reads only the index.
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credkeep").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("CREDKEEP_PASSWORD")
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SOME_KEY"));
}

#[test]
fn rename_moves_the_credential() {
    let dir = setup();

    credkeep(&dir).args(["set", "OLD", "val"]).assert().success();

    credkeep(&dir)
        .args(["rename", "OLD", "NEW"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed"));

    credkeep(&dir)
        .args(["get", "NEW"])
        .assert()
        .success()
        .stdout(predicate::str::contains("val"));

    credkeep(&dir).args(["get", "OLD"]).assert().failure();
}

#[test]
fn rename_onto_existing_name_fails() {
    let dir = setup();

    credkeep(&dir).args(["set", "A", "x"]).assert().success();
    credkeep(&dir).args(["set", "B", "y"]).assert().success();

    credkeep(&dir)
        .args(["rename", "A", "B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn delete_with_force_removes_the_credential() {
    let dir = setup();

    credkeep(&dir)
        .args(["set", "DOOMED", "bye"])
        .assert()
        .success();

    credkeep(&dir)
        .args(["delete", "DOOMED", "--force"])
        .assert()
        .success();

    credkeep(&dir).args(["get", "DOOMED"]).assert().failure();
}

#[test]
fn get_missing_credential_fails() {
    let dir = setup();

    credkeep(&dir)
        .args(["get", "NEVER_SET"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn wrong_password_is_rejected_once_vault_exists() {
    let dir = setup();

    credkeep(&dir).args(["set", "KEY", "v"]).assert().success();

    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credkeep").unwrap();
    cmd.current_dir(dir.path())
        .env("CREDKEEP_PASSWORD", "not-the-password")
        .args(["get", "KEY"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("authentication failed"));
}

#[test]
fn export_endpoints_writes_app_config() {
    let dir = setup();

    credkeep(&dir)
        .args(["export", "endpoints"])
        .assert()
        .success();

    let contents =
        std::fs::read_to_string(dir.path().join("data").join("app-config.json")).unwrap();
    assert!(contents.contains("catapultsports.com"));
}

#[test]
fn export_secrets_writes_json_map() {
    let dir = setup();

    credkeep(&dir)
        .args(["set", "EXPORTED_KEY", "exported-value"])
        .assert()
        .success();

    credkeep(&dir)
        .args(["export", "secrets"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(dir.path().join("data").join("secrets.json")).unwrap();
    assert!(contents.contains("\"EXPORTED_KEY\": \"exported-value\""));
}

#[test]
fn export_unknown_target_fails() {
    let dir = setup();

    credkeep(&dir)
        .args(["export", "everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export target"));
}

#[test]
fn reconcile_reports_listing_count() {
    let dir = setup();

    credkeep(&dir).args(["set", "K", "v"]).assert().success();

    credkeep(&dir)
        .args(["reconcile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reconciled"));
}

#[test]
fn completions_emit_a_script() {
    let dir = setup();

    credkeep(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("credkeep"));
}
