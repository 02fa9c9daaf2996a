use lhammai::ConversationStore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(dead_code)]
pub const MODEL: &str = "ollama:gemma3:4b";
#[allow(dead_code)]
pub const API_BASE: &str = "http://localhost:11434";

#[allow(dead_code)]
pub fn temp_history_path() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let path = tmp.path().join("history.json");
    (tmp, path)
}

#[allow(dead_code)]
pub fn temp_store() -> (ConversationStore, TempDir) {
    let (tmp, path) = temp_history_path();
    (ConversationStore::start_new(path, MODEL, API_BASE), tmp)
}

#[allow(dead_code)]
pub fn write_history(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("history.json");
    fs::write(&path, contents).expect("failed to write history file");
    path
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
