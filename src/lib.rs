//! Lhammai - Interact with any LLM from your terminal
//!
//! This library provides the core functionality for Lhammai: a conversation
//! history store persisted as a single JSON file, a language-model provider
//! abstraction, configuration, and the CLI command handlers built on them.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `history`: Conversation store, data types and the on-disk archive format
//! - `providers`: Provider abstraction and the Ollama implementation
//! - `commands`: Handlers for `ask`, `chat` and `history`
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `ui`: Terminal panels and transcripts
//!
//! # Example
//!
//! ```no_run
//! use lhammai::{ConversationStore, Role};
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = ConversationStore::start_new(
//!         "history.json",
//!         "ollama:gemma3:4b",
//!         "http://localhost:11434",
//!     );
//!     store.add_message(Role::User, "Hello!")?;
//!     store.save_to_disk()?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod providers;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use error::{LhammaiError, Result};
pub use history::{
    Conversation, ConversationId, ConversationStore, HistoryError, Message, Role,
};
