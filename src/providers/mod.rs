//! Provider module for Lhammai
//!
//! This module contains the language-model provider abstraction and the
//! Ollama implementation.

pub mod base;
pub mod ollama;

pub use base::Provider;
pub use ollama::OllamaProvider;

use crate::config::ProviderConfig;
use crate::error::{LhammaiError, Result};

/// Create a provider instance based on configuration
///
/// The provider is chosen from the prefix of `config.model`
/// (`ollama:gemma3:4b` and `ollama/gemma3:4b` both select Ollama with model
/// `gemma3:4b`).
///
/// # Errors
///
/// Returns error if the model string is malformed or names an unknown
/// provider
///
/// # Examples
///
/// ```
/// use lhammai::config::ProviderConfig;
/// use lhammai::providers::create_provider;
///
/// let provider = create_provider(&ProviderConfig::default()).unwrap();
/// assert_eq!(provider.name(), "Ollama");
/// ```
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    let (provider_type, model) = config.split_model().ok_or_else(|| {
        LhammaiError::Config(format!(
            "Invalid model format. Expected 'provider:model' or 'provider/model', got '{}'",
            config.model
        ))
    })?;

    match provider_type {
        "ollama" => Ok(Box::new(OllamaProvider::new(&config.api_base, model)?)),
        _ => Err(LhammaiError::Provider(format!(
            "Unknown provider type: {}",
            provider_type
        ))
        .into()),
    }
}
