//! Conversation data types
//!
//! Roles, messages, metadata and the archive map that the store and codec
//! share.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Sender of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user
    User,
    /// Reply produced by the model
    Assistant,
    /// Instruction that frames the conversation
    System,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent the message
    pub role: Role,
    /// Text of the message
    pub content: String,
}

impl Message {
    /// Create a message with an explicit role
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use lhammai::history::{Message, Role};
    ///
    /// let msg = Message::user("Hello, assistant!");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Descriptive data stored alongside a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMetadata {
    /// Model identifier, e.g. `ollama:gemma3:4b`
    pub model: String,
    /// Provider endpoint the conversation was held against
    pub api_base: String,
    /// When the conversation was started
    #[serde(deserialize_with = "deserialize_start_time")]
    pub start_time: DateTime<Utc>,
    /// Always equal to the number of messages
    pub message_count: usize,
}

/// A full transcript plus its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Descriptive metadata
    pub metadata: ConversationMetadata,
    /// Messages in the order they were added
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Start an empty conversation stamped with the current time
    pub fn new(model: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            metadata: ConversationMetadata {
                model: model.into(),
                api_base: api_base.into(),
                start_time: Utc::now(),
                message_count: 0,
            },
            messages: Vec::new(),
        }
    }

    /// Append a message, keeping `message_count` in step
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.metadata.message_count = self.messages.len();
        debug_assert!(self.is_consistent());
    }

    /// Whether the stored count matches the transcript length
    pub fn is_consistent(&self) -> bool {
        self.metadata.message_count == self.messages.len()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no messages have been added yet
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Every persisted conversation, keyed by canonical UUID string
pub type Archive = BTreeMap<String, Conversation>;

/// Accept RFC 3339 timestamps and offset-less ISO-8601 ones (read as UTC)
fn deserialize_start_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid start_time timestamp: {}", raw))
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = serde_json::from_str::<Message>(r#"{"role":"tool","content":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_push_keeps_count_in_step() {
        let mut conversation = Conversation::new("ollama:gemma3:4b", "http://localhost:11434");
        assert!(conversation.is_empty());
        conversation.push(Message::user("hi"));
        conversation.push(Message::assistant("hello"));
        assert_eq!(conversation.metadata.message_count, 2);
        assert!(conversation.is_consistent());
    }

    #[test]
    fn test_parse_timestamp_accepts_naive_iso() {
        let parsed = parse_timestamp("2025-07-01T10:20:30.123456").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-07-01T10:20:30.123456+00:00");
    }

    #[test]
    fn test_parse_timestamp_converts_offsets_to_utc() {
        let parsed = parse_timestamp("2025-07-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-07-01T10:00:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
    }
}
