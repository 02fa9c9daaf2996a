//! Conversation identifiers
//!
//! Archive entries are keyed by the canonical hyphenated lowercase string of
//! a v4 UUID. Every lookup goes through [`ConversationKey`] so that a raw
//! [`Uuid`], a [`ConversationId`] and a string all resolve to the same key.

use super::error::{HistoryError, HistoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a single conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(Uuid);

impl ConversationId {
    /// Mint a fresh random identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use lhammai::history::ConversationId;
    ///
    /// let a = ConversationId::new();
    /// let b = ConversationId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from user input
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::InvalidIdentifier` if `input` is not a UUID
    pub fn parse(input: &str) -> HistoryResult<Self> {
        Uuid::parse_str(input.trim())
            .map(Self)
            .map_err(|_| HistoryError::InvalidIdentifier(input.to_string()))
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Canonical archive key for this identifier
    pub fn as_key(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ConversationId {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for ConversationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Anything that can address an archived conversation
///
/// Implementations must yield the canonical string key; string inputs are
/// parsed and re-rendered so that case and formatting differences do not
/// cause false "not found" results.
pub trait ConversationKey {
    /// Normalize to the canonical archive key
    fn to_conversation_key(&self) -> HistoryResult<String>;
}

impl ConversationKey for ConversationId {
    fn to_conversation_key(&self) -> HistoryResult<String> {
        Ok(self.as_key())
    }
}

impl ConversationKey for Uuid {
    fn to_conversation_key(&self) -> HistoryResult<String> {
        Ok(self.hyphenated().to_string())
    }
}

impl ConversationKey for str {
    fn to_conversation_key(&self) -> HistoryResult<String> {
        ConversationId::parse(self).map(|id| id.as_key())
    }
}

impl ConversationKey for String {
    fn to_conversation_key(&self) -> HistoryResult<String> {
        self.as_str().to_conversation_key()
    }
}

impl<T: ConversationKey + ?Sized> ConversationKey for &T {
    fn to_conversation_key(&self) -> HistoryResult<String> {
        (**self).to_conversation_key()
    }
}
