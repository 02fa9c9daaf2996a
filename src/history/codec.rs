//! JSON codec for the history archive
//!
//! The archive is one JSON object mapping canonical UUID strings to
//! `{"metadata": {...}, "messages": [...]}` entries. Reads treat a missing or
//! blank file as an empty archive; writes replace the whole file atomically.

use super::error::{HistoryError, HistoryResult};
use super::id::ConversationKey;
use super::types::Archive;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Serialize an archive to pretty-printed JSON
///
/// An empty archive encodes as the literal `{}`.
pub fn encode(archive: &Archive) -> HistoryResult<String> {
    if archive.is_empty() {
        return Ok("{}".to_string());
    }
    serde_json::to_string_pretty(archive).map_err(HistoryError::Encode)
}

/// Parse archive JSON read from `origin`
///
/// Keys are validated as UUIDs and normalized to canonical form, and each
/// entry's `message_count` must match its message list.
///
/// # Errors
///
/// * `HistoryError::MalformedHistory` if the text is not valid JSON or does
///   not have the archive shape (including unknown roles and bad timestamps)
/// * `HistoryError::MalformedEntry` if a key is not a UUID, two keys name the
///   same UUID, or an entry's count disagrees with its messages
pub fn decode(text: &str, origin: &Path) -> HistoryResult<Archive> {
    if text.trim().is_empty() {
        return Ok(Archive::new());
    }

    let raw: Archive =
        serde_json::from_str(text).map_err(|source| HistoryError::MalformedHistory {
            path: origin.to_path_buf(),
            source,
        })?;

    let mut archive = Archive::new();
    for (key, conversation) in raw {
        let canonical = key
            .to_conversation_key()
            .map_err(|_| HistoryError::MalformedEntry {
                key: key.clone(),
                reason: "key is not a UUID".to_string(),
            })?;

        if !conversation.is_consistent() {
            return Err(HistoryError::MalformedEntry {
                key,
                reason: format!(
                    "message_count is {} but {} messages are stored",
                    conversation.metadata.message_count,
                    conversation.messages.len()
                ),
            });
        }

        if archive.insert(canonical.clone(), conversation).is_some() {
            return Err(HistoryError::MalformedEntry {
                key,
                reason: format!("duplicate identifier {}", canonical),
            });
        }
    }

    Ok(archive)
}

/// Load the archive stored at `path`
///
/// A file that does not exist yields an empty archive.
pub fn read_archive(path: &Path) -> HistoryResult<Archive> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("History file {} does not exist yet", path.display());
            return Ok(Archive::new());
        }
        Err(e) => return Err(e.into()),
    };

    let archive = decode(&text, path)?;
    tracing::debug!(
        "Loaded {} conversations from {}",
        archive.len(),
        path.display()
    );
    Ok(archive)
}

/// Replace the archive stored at `path`
///
/// The JSON is written to a sibling temporary file, synced, then renamed over
/// the target so readers only ever see a complete document.
pub fn write_archive(path: &Path, archive: &Archive) -> HistoryResult<()> {
    let contents = encode(archive)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path);
    let written = (|| -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    tracing::debug!(
        "Wrote {} conversations to {}",
        archive.len(),
        path.display()
    );
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "history.json".to_string());
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(
        ".{}.{}.{}.{}.tmp",
        file_name,
        std::process::id(),
        nanos,
        seq
    ))
}
