//! Conversation history
//!
//! This module owns every conversation the CLI has held:
//!
//! - `store`: the [`ConversationStore`] with its active conversation and
//!   archive operations (save, load, list, delete, clear)
//! - `codec`: JSON encoding of the archive and atomic file replacement
//! - `id`: identifiers and key normalization
//! - `types`: roles, messages, metadata and conversations
//! - `error`: the [`HistoryError`] kinds surfaced to callers

pub mod codec;
pub mod error;
pub mod id;
pub mod store;
pub mod types;

pub use error::{HistoryError, HistoryResult};
pub use id::{ConversationId, ConversationKey};
pub use store::ConversationStore;
pub use types::{Archive, Conversation, ConversationMetadata, Message, Role};
