#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn folio_cmd(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("folio"));
    cmd.env("FOLIO_DATA", data.path().as_os_str())
        .env_remove("FOLIO_LOG");
    cmd
}

#[test]
fn test_naked_invocation_shows_seed_tree() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome"))
        .stdout(predicate::str::contains("Guides"))
        // Guides starts collapsed.
        .stdout(predicate::str::contains("Project Setup").not());
}

#[test]
fn test_expand_then_tree_shows_children() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data).args(["expand", "guides"]).assert().success();
    folio_cmd(&data)
        .args(["tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project Setup"))
        .stdout(predicate::str::contains("Performance"));

    folio_cmd(&data).args(["collapse", "gui"]).assert().success();
    folio_cmd(&data)
        .args(["tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project Setup").not());
}

#[test]
fn test_create_under_parent_persists() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data)
        .args(["create", "--parent", "guides", "Release", "notes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document created: Release notes"));

    // Creating under a parent expands it.
    folio_cmd(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Release notes"));
    assert!(data.path().join("folio_v1.json").exists());
}

#[test]
fn test_archive_restore_purge_workflow() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data)
        .args(["archive", "guides"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 3 documents to the trash"));

    folio_cmd(&data)
        .args(["trash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project Setup  from guides"))
        .stdout(predicate::str::contains("Guides  from root"));

    folio_cmd(&data)
        .args(["restore", "setup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("still in the trash"));

    folio_cmd(&data)
        .args(["restore", "guides"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Re-attached 1 document(s)"));

    folio_cmd(&data)
        .args(["purge", "perf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Permanently deleted 1 document(s)"));

    folio_cmd(&data)
        .args(["trash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trash is empty."));
}

#[test]
fn test_restore_looks_in_trash_only() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data)
        .args(["restore", "welcome"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document not found: welcome"));
}

#[test]
fn test_show_renders_breadcrumbs_and_content() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data)
        .args(["show", "setup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Guides / Project Setup"));

    folio_cmd(&data)
        .args(["show", "guides"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Guide Index"))
        .stdout(predicate::str::contains("- Performance"));
}

#[test]
fn test_write_reads_stdin() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data)
        .args(["write", "welcome", "-"])
        .write_stdin("<p>Written from a pipe</p>")
        .assert()
        .success()
        .stdout(predicate::str::contains("Content saved"));

    folio_cmd(&data)
        .args(["show", "welcome"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Written from a pipe"));
}

#[test]
fn test_move_into_own_subtree_changes_nothing() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data)
        .args(["move", "guides", "inside", "setup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing changed"));

    folio_cmd(&data)
        .args(["show", "setup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Guides / Project Setup"));
}

#[test]
fn test_first_run_opens_welcome() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data)
        .args(["show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome"))
        .stdout(predicate::str::contains("Your first page"));
}

#[test]
fn test_open_and_close() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data)
        .args(["open", "perf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Guides / Performance"));

    folio_cmd(&data)
        .args(["show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Performance"));

    folio_cmd(&data).args(["close"]).assert().success();
    folio_cmd(&data)
        .args(["show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No document is open"));
}

#[test]
fn test_open_archived_document_shows_not_found() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data).args(["open", "welcome"]).assert().success();
    folio_cmd(&data).args(["archive", "welcome"]).assert().success();
    folio_cmd(&data)
        .args(["show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document welcome does not exist"));
}

#[test]
fn test_favorites_and_star() {
    let data = TempDir::new().unwrap();

    folio_cmd(&data).args(["star", "perf"]).assert().success();
    folio_cmd(&data)
        .args(["favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Guides"))
        .stdout(predicate::str::contains("Performance"));

    folio_cmd(&data).args(["unstar", "guides"]).assert().success();
    folio_cmd(&data)
        .args(["favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Guides").not());
}

#[test]
fn test_corrupt_snapshot_warns_and_shows_seed() {
    let data = TempDir::new().unwrap();
    fs::write(data.path().join("folio_v1.json"), "not json").unwrap();

    folio_cmd(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome"))
        .stderr(predicate::str::contains("could not be read"));

    // Reading alone does not replace the broken file.
    assert_eq!(
        fs::read_to_string(data.path().join("folio_v1.json")).unwrap(),
        "not json"
    );
}

#[test]
fn test_config_lists_resolved_values() {
    let data = TempDir::new().unwrap();
    fs::write(data.path().join("folio.toml"), "content_debounce_ms = 50\n").unwrap();

    folio_cmd(&data)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("storage_key = \"folio:v1\""))
        .stdout(predicate::str::contains("content_debounce_ms = 50"));
}

#[test]
fn test_data_flag_overrides_env() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();

    folio_cmd(&env_dir)
        .arg("--data")
        .arg(flag_dir.path())
        .args(["rename", "welcome", "Hello"])
        .assert()
        .success();

    assert!(flag_dir.path().join("folio_v1.json").exists());
    assert!(!env_dir.path().join("folio_v1.json").exists());
}
