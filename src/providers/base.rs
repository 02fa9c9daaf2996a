//! Base provider trait for Lhammai
//!
//! A provider turns the full transcript of a conversation into the next
//! assistant reply. The conversation store never talks to a provider itself;
//! command handlers pass the store's messages in and append the reply.

use crate::error::Result;
use crate::history::Message;
use async_trait::async_trait;

/// Language-model backend
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use lhammai::history::Message;
/// use lhammai::providers::Provider;
///
/// struct Echo;
///
/// #[async_trait]
/// impl Provider for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     async fn complete(&self, messages: &[Message]) -> lhammai::error::Result<String> {
///         Ok(messages.last().map(|m| m.content.clone()).unwrap_or_default())
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human readable provider name, used in error messages
    fn name(&self) -> &str;

    /// Completes a conversation with the given messages
    ///
    /// # Arguments
    ///
    /// * `messages` - Conversation history in order, ending with the newest
    ///   user message
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be reached, answers with an
    /// error status, or streams its reply
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}
