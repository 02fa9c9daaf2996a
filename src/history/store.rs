//! The conversation store
//!
//! A [`ConversationStore`] owns at most one active conversation plus a handle
//! on the on-disk archive. Appends from any number of threads are serialized
//! by a single mutex; disk operations never run while that mutex is held.

use super::codec;
use super::error::{HistoryError, HistoryResult};
use super::id::{ConversationId, ConversationKey};
use super::types::{Archive, Conversation, Message, Role};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// The conversation currently being appended to
#[derive(Debug, Clone)]
struct ActiveConversation {
    id: ConversationId,
    conversation: Conversation,
}

/// Creates, mutates, persists and retrieves conversations
///
/// # Examples
///
/// ```
/// use lhammai::history::{ConversationStore, Role};
///
/// # fn main() -> Result<(), lhammai::history::HistoryError> {
/// let dir = tempfile::tempdir().unwrap();
/// let store = ConversationStore::start_new(
///     dir.path().join("history.json"),
///     "ollama:gemma3:4b",
///     "http://localhost:11434",
/// );
/// store.add_message(Role::User, "Hello")?;
/// store.save_to_disk()?;
///
/// let id = store.get_current_identifier().unwrap();
/// let loaded = store.load_from_disk(&id)?;
/// assert_eq!(loaded.messages.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConversationStore {
    history_file: PathBuf,
    active: Mutex<Option<ActiveConversation>>,
}

impl ConversationStore {
    /// Open a store over `history_file` with no active conversation
    pub fn open(history_file: impl Into<PathBuf>) -> Self {
        Self {
            history_file: history_file.into(),
            active: Mutex::new(None),
        }
    }

    /// Open a store and start a fresh conversation on it
    pub fn start_new(
        history_file: impl Into<PathBuf>,
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        let active = ActiveConversation {
            id: ConversationId::new(),
            conversation: Conversation::new(model, api_base),
        };
        tracing::debug!("Started conversation {}", active.id);
        Self {
            history_file: history_file.into(),
            active: Mutex::new(Some(active)),
        }
    }

    /// Location of the archive file
    pub fn history_file(&self) -> &Path {
        &self.history_file
    }

    /// Replace the active conversation with a fresh one
    ///
    /// Unsaved messages of the previous conversation are dropped.
    pub fn begin(
        &self,
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> HistoryResult<ConversationId> {
        let id = ConversationId::new();
        let fresh = ActiveConversation {
            id,
            conversation: Conversation::new(model, api_base),
        };
        *self.lock()? = Some(fresh);
        tracing::debug!("Started conversation {}", id);
        Ok(id)
    }

    /// Make an archived conversation the active one
    ///
    /// # Errors
    ///
    /// * `HistoryError::InvalidIdentifier` for malformed identifiers
    /// * `HistoryError::ConversationNotFound` if it is not archived
    pub fn resume<K: ConversationKey + ?Sized>(&self, key: &K) -> HistoryResult<ConversationId> {
        let id = ConversationId::parse(&key.to_conversation_key()?)?;
        let conversation = self.load_from_disk(&id)?;
        tracing::debug!(
            "Resuming conversation {} with {} messages",
            id,
            conversation.len()
        );
        *self.lock()? = Some(ActiveConversation { id, conversation });
        Ok(id)
    }

    /// Drop the active conversation
    ///
    /// Afterwards operations that need one fail with
    /// `HistoryError::NoActiveConversation`.
    pub fn end_current(&self) -> HistoryResult<()> {
        self.lock()?.take();
        Ok(())
    }

    /// Append a message to the active conversation
    ///
    /// The append and the count update happen under one lock, so concurrent
    /// readers never see them out of step.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NoActiveConversation` if none is active
    pub fn add_message(&self, role: Role, content: impl Into<String>) -> HistoryResult<()> {
        let message = Message::new(role, content);
        let mut guard = self.lock()?;
        let active = guard.as_mut().ok_or(HistoryError::NoActiveConversation)?;
        active.conversation.push(message);
        Ok(())
    }

    /// Independent copy of the active conversation
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NoActiveConversation` if none is active
    pub fn get_current_conversation(&self) -> HistoryResult<Conversation> {
        self.with_active(|active| active.conversation.clone())
    }

    /// Key-value snapshot of the active conversation's metadata
    ///
    /// Contains `model`, `api_base`, `start_time` (RFC 3339) and
    /// `message_count`.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NoActiveConversation` if none is active
    pub fn get_current_metadata(
        &self,
    ) -> HistoryResult<serde_json::Map<String, serde_json::Value>> {
        let metadata = self.with_active(|active| active.conversation.metadata.clone())?;
        let mut map = serde_json::Map::new();
        map.insert("model".to_string(), metadata.model.into());
        map.insert("api_base".to_string(), metadata.api_base.into());
        map.insert(
            "start_time".to_string(),
            metadata.start_time.to_rfc3339().into(),
        );
        map.insert("message_count".to_string(), metadata.message_count.into());
        Ok(map)
    }

    /// Identifier of the active conversation, if any
    pub fn get_current_identifier(&self) -> Option<ConversationId> {
        self.lock().ok().and_then(|guard| guard.as_ref().map(|a| a.id))
    }

    /// Upsert the active conversation into the archive file
    ///
    /// The whole archive is read, the entry replaced under its canonical key,
    /// and the whole archive written back.
    ///
    /// # Errors
    ///
    /// * `HistoryError::NoActiveConversation` if none is active
    /// * `HistoryError::MalformedHistory` if the existing file is corrupt
    /// * `HistoryError::Io` on filesystem failures
    pub fn save_to_disk(&self) -> HistoryResult<()> {
        let snapshot = self.with_active(Clone::clone)?;

        let mut archive = self.load_history_from_disk()?;
        archive.insert(snapshot.id.as_key(), snapshot.conversation);
        codec::write_archive(&self.history_file, &archive)?;

        tracing::debug!("Saved conversation {}", snapshot.id);
        Ok(())
    }

    /// Read every archived conversation
    ///
    /// A missing file is an empty archive.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::MalformedHistory` if the file is not valid
    /// archive JSON
    pub fn load_history_from_disk(&self) -> HistoryResult<Archive> {
        codec::read_archive(&self.history_file)
    }

    /// Load one archived conversation
    ///
    /// Accepts a [`ConversationId`], a raw [`uuid::Uuid`] or a string; all
    /// are normalized to the canonical key before lookup.
    ///
    /// # Errors
    ///
    /// * `HistoryError::InvalidIdentifier` for malformed identifiers
    /// * `HistoryError::ConversationNotFound` if it is not archived
    pub fn load_from_disk<K: ConversationKey + ?Sized>(
        &self,
        key: &K,
    ) -> HistoryResult<Conversation> {
        let key = key.to_conversation_key()?;
        let mut archive = self.load_history_from_disk()?;
        archive
            .remove(&key)
            .ok_or(HistoryError::ConversationNotFound(key))
    }

    /// Identifiers of every archived conversation
    pub fn list_conversation_uuids(&self) -> HistoryResult<Vec<ConversationId>> {
        self.load_history_from_disk()?
            .keys()
            .map(|key| ConversationId::parse(key))
            .collect()
    }

    /// Remove one conversation from the archive
    ///
    /// The identifier is validated before the file is touched.
    ///
    /// # Errors
    ///
    /// * `HistoryError::InvalidIdentifier` for malformed identifiers
    /// * `HistoryError::DeletionFailed` if it is not archived
    pub fn delete_conversation<K: ConversationKey + ?Sized>(
        &self,
        key: &K,
    ) -> HistoryResult<bool> {
        let key = key.to_conversation_key()?;
        let mut archive = self.load_history_from_disk()?;

        if archive.remove(&key).is_none() {
            return Err(HistoryError::DeletionFailed(key));
        }

        codec::write_archive(&self.history_file, &archive)?;
        tracing::debug!("Deleted conversation {}", key);
        Ok(true)
    }

    /// Overwrite the archive file with `{}`
    pub fn clear_all_history(&self) -> HistoryResult<()> {
        codec::write_archive(&self.history_file, &Archive::new())?;
        tracing::debug!("Cleared history at {}", self.history_file.display());
        Ok(())
    }

    fn lock(&self) -> HistoryResult<MutexGuard<'_, Option<ActiveConversation>>> {
        self.active.lock().map_err(|_| HistoryError::LockPoisoned)
    }

    fn with_active<T>(&self, f: impl FnOnce(&ActiveConversation) -> T) -> HistoryResult<T> {
        let guard = self.lock()?;
        guard
            .as_ref()
            .map(f)
            .ok_or(HistoryError::NoActiveConversation)
    }
}
