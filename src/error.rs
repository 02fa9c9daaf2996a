//! Error types for Lhammai
//!
//! This module defines the application-level error type, using `thiserror`
//! for ergonomic error handling. History errors keep their own typed enum
//! (see [`crate::history::HistoryError`]) and convert into this one.

use crate::history::HistoryError;
use thiserror::Error;

/// Main error type for Lhammai operations
#[derive(Error, Debug)]
pub enum LhammaiError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (bad responses, unknown providers)
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider endpoint could not be reached
    #[error("Failed to connect to {provider} at {api_base}. Please check your settings.")]
    ProviderUnavailable {
        /// Provider name, e.g. `ollama`
        provider: String,
        /// Endpoint that was contacted
        api_base: String,
    },

    /// Streaming not supported by provider
    #[error("Streaming responses are not supported yet.")]
    StreamingNotSupported,

    /// Conversation history errors
    #[error(transparent)]
    History(#[from] HistoryError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Line editor errors in interactive mode
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for Lhammai operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
