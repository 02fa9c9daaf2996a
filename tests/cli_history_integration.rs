//! End-to-end tests for the `history` subcommands
//!
//! Each test points the binary at its own history file and at a config
//! path that does not exist, so defaults are used and no network is needed.

use assert_cmd::Command;
use lhammai::history::{ConversationStore, Role};
use predicates::prelude::*;
use std::fs;
use std::path::Path;

mod common;

fn lhammai(history_file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lhammai").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("LHAMMAI_MODEL")
        .env_remove("LHAMMAI_API_BASE")
        .env_remove("API_BASE")
        .arg("--config")
        .arg(history_file.with_file_name("missing-config.yaml"))
        .arg("--history-file")
        .arg(history_file);
    cmd
}

fn saved_conversation(history_file: &Path) -> String {
    let store = ConversationStore::start_new(history_file, common::MODEL, common::API_BASE);
    store.add_message(Role::User, "What is Rust?").unwrap();
    store
        .add_message(Role::Assistant, "A systems programming language.")
        .unwrap();
    store.save_to_disk().unwrap();
    store.get_current_identifier().unwrap().to_string()
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("lhammai")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lhammai"));
}

#[test]
fn test_history_list_empty() {
    let (_tmp, history_file) = common::temp_history_path();

    lhammai(&history_file)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No conversation history found."));
}

#[test]
fn test_history_list_shows_saved_conversation() {
    let (_tmp, history_file) = common::temp_history_path();
    let id = saved_conversation(&history_file);

    lhammai(&history_file)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("What is Rust?"))
        .stdout(predicate::str::contains(common::MODEL));
}

#[test]
fn test_history_show_prints_transcript() {
    let (_tmp, history_file) = common::temp_history_path();
    let id = saved_conversation(&history_file);

    lhammai(&history_file)
        .args(["history", "show", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("What is Rust?"))
        .stdout(predicate::str::contains("A systems programming language."))
        .stdout(predicate::str::contains("(2 messages)"));
}

#[test]
fn test_history_show_unknown_conversation_fails() {
    let (_tmp, history_file) = common::temp_history_path();
    saved_conversation(&history_file);

    lhammai(&history_file)
        .args(["history", "show", "21173421-201f-4e56-87a0-8e13fc02f7e5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found in history"));
}

#[test]
fn test_history_delete_removes_entry() {
    let (_tmp, history_file) = common::temp_history_path();
    let id = saved_conversation(&history_file);

    lhammai(&history_file)
        .args(["history", "delete", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted conversation"));

    let store = ConversationStore::open(&history_file);
    assert!(store.list_conversation_uuids().unwrap().is_empty());
}

#[test]
fn test_history_delete_rejects_invalid_identifier() {
    let (_tmp, history_file) = common::temp_history_path();
    saved_conversation(&history_file);
    let before = fs::read_to_string(&history_file).unwrap();

    lhammai(&history_file)
        .args(["history", "delete", "not-a-uuid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid UUID format: not-a-uuid"));

    assert_eq!(fs::read_to_string(&history_file).unwrap(), before);
}

#[test]
fn test_history_delete_unknown_conversation_fails() {
    let (_tmp, history_file) = common::temp_history_path();

    lhammai(&history_file)
        .args(["history", "delete", "21173421-201f-4e56-87a0-8e13fc02f7e5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to delete conversation"));
}

#[test]
fn test_history_clear_with_yes() {
    let (_tmp, history_file) = common::temp_history_path();
    saved_conversation(&history_file);

    lhammai(&history_file)
        .args(["history", "clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Conversation history cleared"));

    assert_eq!(fs::read_to_string(&history_file).unwrap(), "{}");
}

#[test]
fn test_history_clear_can_be_declined() {
    let (_tmp, history_file) = common::temp_history_path();
    saved_conversation(&history_file);
    let before = fs::read_to_string(&history_file).unwrap();

    lhammai(&history_file)
        .args(["history", "clear"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert_eq!(fs::read_to_string(&history_file).unwrap(), before);
}

#[test]
fn test_history_list_reports_malformed_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let history_file = common::write_history(tmp.path(), "[1, 2, 3]");

    lhammai(&history_file)
        .args(["history", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse history file"));
}

#[test]
fn test_ask_rejects_invalid_model() {
    let (_tmp, history_file) = common::temp_history_path();

    lhammai(&history_file)
        .args(["ask", "hello", "--model", "invalid-model-format"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid model format"));

    assert!(!history_file.exists());
}

#[test]
fn test_history_file_from_config() {
    let (_tmp, history_file) = common::temp_history_path();
    let id = saved_conversation(&history_file);
    let (_config_dir, config_path) = common::temp_config_file(&format!(
        "history:\n  file: {}\n",
        history_file.display()
    ));

    Command::cargo_bin("lhammai")
        .unwrap()
        .env("NO_COLOR", "1")
        .env_remove("LHAMMAI_HISTORY_FILE")
        .arg("--config")
        .arg(&config_path)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()));
}
