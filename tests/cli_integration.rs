use assert_cmd::Command;
use predicates::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

fn notekeeper(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notekeeper").unwrap();
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

fn stored_keys(data_dir: &Path) -> Vec<String> {
    let content = std::fs::read_to_string(data_dir.join("notes.json")).unwrap();
    let map: BTreeMap<String, serde_json::Value> = serde_json::from_str(&content).unwrap();
    map.into_keys().collect()
}

#[test]
fn add_then_list() {
    let temp_dir = tempfile::tempdir().unwrap();

    notekeeper(temp_dir.path())
        .args(["add", "Groceries", "--body", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note added successfully"));

    notekeeper(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Page 1 of 1 (1 notes)"));
}

#[test]
fn empty_store_lists_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    notekeeper(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found."));
}

#[test]
fn blank_title_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();

    notekeeper(temp_dir.path())
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title is required"));

    assert!(!temp_dir.path().join("notes.json").exists());
}

#[test]
fn pin_view_and_delete_by_prefix() {
    let temp_dir = tempfile::tempdir().unwrap();
    notekeeper(temp_dir.path())
        .args(["add", "Keep me", "-t", "important"])
        .assert()
        .success();

    let key = stored_keys(temp_dir.path()).remove(0);
    let prefix = &key[..8];

    notekeeper(temp_dir.path())
        .args(["pin", prefix])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note pin toggled"));

    notekeeper(temp_dir.path())
        .args(["view", prefix])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep me"))
        .stdout(predicate::str::contains("important"))
        .stdout(predicate::str::contains(key.as_str()));

    notekeeper(temp_dir.path())
        .args(["rm", prefix])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note deleted successfully"));

    assert!(stored_keys(temp_dir.path()).is_empty());
}

#[test]
fn edit_changes_only_given_fields() {
    let temp_dir = tempfile::tempdir().unwrap();
    notekeeper(temp_dir.path())
        .args(["add", "Title", "-b", "old body"])
        .assert()
        .success();
    let key = stored_keys(temp_dir.path()).remove(0);

    notekeeper(temp_dir.path())
        .args(["edit", &key, "-b", "new body"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note updated successfully"));

    notekeeper(temp_dir.path())
        .args(["view", &key])
        .assert()
        .success()
        .stdout(predicate::str::contains("new body"))
        .stdout(predicate::str::contains("Title"));
}

#[test]
fn unknown_id_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    notekeeper(temp_dir.path())
        .args(["pin", "doesnotexist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Note not found"));
}

#[test]
fn page_size_config_drives_pagination() {
    let temp_dir = tempfile::tempdir().unwrap();
    notekeeper(temp_dir.path())
        .args(["config", "page-size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page-size = 2"));

    for title in ["One", "Two", "Three"] {
        notekeeper(temp_dir.path()).args(["add", title]).assert().success();
    }

    notekeeper(temp_dir.path())
        .args(["list", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("One"))
        .stdout(predicate::str::contains("Page 2 of 2 (3 notes)"));

    notekeeper(temp_dir.path())
        .args(["config", "page-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn corrupt_collection_reports_fetch_failure() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("notes.json"), "not json").unwrap();

    notekeeper(temp_dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch notes"));
}

#[test]
fn collection_named_config_is_refused() {
    let temp_dir = tempfile::tempdir().unwrap();

    notekeeper(temp_dir.path())
        .args(["config", "collection", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid collection name"));

    notekeeper(temp_dir.path())
        .args(["add", "Still works"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note added successfully"));
    assert_eq!(stored_keys(temp_dir.path()).len(), 1);
}
