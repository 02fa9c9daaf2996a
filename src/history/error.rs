//! Error types for conversation history operations
//!
//! Every failure is surfaced to the caller: a missing conversation or a
//! corrupt history file is never swallowed.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the conversation store and its codec
#[derive(Error, Debug)]
pub enum HistoryError {
    /// An operation required an active conversation but none is set
    #[error("No conversation started")]
    NoActiveConversation,

    /// The identifier is absent from the archive
    #[error("Conversation {0} not found in history")]
    ConversationNotFound(String),

    /// The supplied identifier is not a well-formed UUID
    #[error("Invalid UUID format: {0}")]
    InvalidIdentifier(String),

    /// The history file exists but is not valid JSON or has the wrong shape
    #[error("Failed to parse history file {}: {source}", path.display())]
    MalformedHistory {
        /// Location of the offending file
        path: PathBuf,
        /// Underlying parse failure
        #[source]
        source: serde_json::Error,
    },

    /// The history file parsed but an entry breaks an archive invariant
    #[error("Malformed history entry {key}: {reason}")]
    MalformedEntry {
        /// Archive key of the entry
        key: String,
        /// What is wrong with it
        reason: String,
    },

    /// Delete was requested for an identifier that is not archived
    #[error("Failed to delete conversation {0}: not found in history")]
    DeletionFailed(String),

    /// The archive could not be serialized
    #[error("Failed to encode history: {0}")]
    Encode(#[source] serde_json::Error),

    /// A thread panicked while holding the store lock
    #[error("Conversation state lock poisoned")]
    LockPoisoned,

    /// Filesystem errors reading or writing the history file
    #[error("History IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for history operations
pub type HistoryResult<T> = std::result::Result<T, HistoryError>;
