//! Ollama provider implementation for Lhammai
//!
//! Sends the whole transcript to Ollama's `/api/chat` endpoint with
//! streaming disabled and returns the assistant's reply text.

use crate::error::{LhammaiError, Result};
use crate::history::Message;
use crate::providers::Provider;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama API provider
///
/// # Examples
///
/// ```no_run
/// use lhammai::history::Message;
/// use lhammai::providers::{OllamaProvider, Provider};
///
/// # async fn example() -> lhammai::error::Result<()> {
/// let provider = OllamaProvider::new("http://localhost:11434", "gemma3:4b")?;
/// let reply = provider.complete(&[Message::user("Hello!")]).await?;
/// # Ok(())
/// # }
/// ```
pub struct OllamaProvider {
    client: Client,
    api_base: String,
    model: String,
}

/// Request structure for Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

/// Message structure in Ollama responses
#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}

/// Response structure from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
    #[serde(default)]
    prompt_eval_count: usize,
    #[serde(default)]
    eval_count: usize,
}

impl OllamaProvider {
    /// Create a new Ollama provider instance
    ///
    /// # Arguments
    ///
    /// * `api_base` - Ollama server base URL
    /// * `model` - Model name without the provider prefix
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(concat!("lhammai/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LhammaiError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        let api_base = api_base.into().trim_end_matches('/').to_string();
        let model = model.into();

        tracing::info!(
            "Initialized Ollama provider: api_base={}, model={}",
            api_base,
            model
        );

        Ok(Self {
            client,
            api_base,
            model,
        })
    }

    /// Get the configured Ollama base URL
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let url = format!("{}/api/chat", self.api_base);
        let request = OllamaRequest {
            model: &self.model,
            messages,
            stream: false,
        };

        tracing::debug!("Sending Ollama request: {} messages", messages.len());

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ollama request failed: {}", e);
                if e.is_connect() || e.is_timeout() {
                    LhammaiError::ProviderUnavailable {
                        provider: self.name().to_string(),
                        api_base: self.api_base.clone(),
                    }
                } else {
                    LhammaiError::Provider(format!("Ollama request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned error {}: {}", status, error_text);
            return Err(LhammaiError::Provider(format!(
                "Ollama returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let streamed = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/x-ndjson"));
        if streamed {
            return Err(LhammaiError::StreamingNotSupported.into());
        }

        let ollama_response: OllamaResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            LhammaiError::Provider(format!("Failed to parse Ollama response: {}", e))
        })?;

        tracing::debug!(
            "Ollama response: prompt_tokens={}, completion_tokens={}",
            ollama_response.prompt_eval_count,
            ollama_response.eval_count
        );

        let content = ollama_response.message.content;
        if content.trim().is_empty() {
            return Err(
                LhammaiError::Provider("Ollama returned an empty reply".to_string()).into(),
            );
        }

        Ok(content)
    }
}
