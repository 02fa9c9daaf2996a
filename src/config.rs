//! Configuration management for Lhammai
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{LhammaiError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Providers the CLI knows how to talk to
pub const SUPPORTED_PROVIDERS: &[&str] = &["ollama"];

/// Main configuration structure for Lhammai
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model and endpoint selection
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Conversation history settings
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Provider configuration
///
/// `model` names its provider first, separated by `:` or `/`, e.g.
/// `ollama:gemma3:4b` or `ollama/gemma3:4b`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Model to use, prefixed with its provider
    #[serde(default = "default_model")]
    pub model: String,

    /// Provider API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_model() -> String {
    "ollama:gemma3:4b".to_string()
}

fn default_api_base() -> String {
    "http://localhost:11434".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
        }
    }
}

impl ProviderConfig {
    /// Split `model` into its provider and model name
    ///
    /// The provider ends at the first `:` or `/`, whichever comes first.
    ///
    /// # Examples
    ///
    /// ```
    /// use lhammai::config::ProviderConfig;
    ///
    /// let mut config = ProviderConfig::default();
    /// assert_eq!(config.split_model(), Some(("ollama", "gemma3:4b")));
    ///
    /// config.model = "ollama/gemma3:4b".to_string();
    /// assert_eq!(config.split_model(), Some(("ollama", "gemma3:4b")));
    /// ```
    pub fn split_model(&self) -> Option<(&str, &str)> {
        let (provider, model) = self.model.split_once([':', '/'])?;
        if provider.is_empty() || model.is_empty() {
            return None;
        }
        Some((provider, model))
    }
}

/// Conversation history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Path of the history file; defaults to the user data directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Save the conversation after every assistant reply
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
}

fn default_auto_save() -> bool {
    true
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: None,
            auto_save: default_auto_save(),
        }
    }
}

impl HistoryConfig {
    /// Resolve the history file location
    ///
    /// Uses the configured path if set, otherwise `history.json` in the
    /// platform data directory.
    pub fn resolve_file(&self) -> Result<PathBuf> {
        if let Some(file) = &self.file {
            return Ok(file.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "lhammai", "lhammai").ok_or_else(|| {
            LhammaiError::Config("Could not determine data directory".to_string())
        })?;
        Ok(proj_dirs.data_dir().join("history.json"))
    }
}

impl Config {
    /// Load configuration from file, environment and CLI flags
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged. Environment variables override the file, CLI flags override
    /// both.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LhammaiError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| LhammaiError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(model) = std::env::var("LHAMMAI_MODEL") {
            self.provider.model = model;
        }

        let api_base = std::env::var("LHAMMAI_API_BASE").or_else(|_| std::env::var("API_BASE"));
        if let Ok(api_base) = api_base {
            self.provider.api_base = api_base;
        }

        if let Ok(file) = std::env::var("LHAMMAI_HISTORY_FILE") {
            self.history.file = Some(PathBuf::from(file));
        }

        if let Ok(auto_save) = std::env::var("LHAMMAI_AUTO_SAVE") {
            match auto_save.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.history.auto_save = true,
                "0" | "false" | "no" | "off" => self.history.auto_save = false,
                _ => tracing::warn!("Invalid LHAMMAI_AUTO_SAVE: {}", auto_save),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(file) = &cli.history_file {
            self.history.file = Some(file.clone());
        }
    }

    /// Apply per-command model and endpoint overrides
    pub fn with_provider_overrides(
        mut self,
        model: Option<String>,
        api_base: Option<String>,
    ) -> Self {
        if let Some(model) = model {
            self.provider.model = model;
        }
        if let Some(api_base) = api_base {
            self.provider.api_base = api_base;
        }
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the model is not `provider:model` (or
    /// `provider/model`), the provider is
    /// unsupported, or the API base is not an http(s) URL
    pub fn validate(&self) -> Result<()> {
        let (provider, _) = self.provider.split_model().ok_or_else(|| {
            LhammaiError::Config(format!(
                "Invalid model format. Expected 'provider:model' or 'provider/model', got '{}'",
                self.provider.model
            ))
        })?;

        if !SUPPORTED_PROVIDERS.contains(&provider) {
            return Err(LhammaiError::Config(format!(
                "'{}' is not a supported provider. Must be one of: {}",
                provider,
                SUPPORTED_PROVIDERS.join(", ")
            ))
            .into());
        }

        let api_base = url::Url::parse(&self.provider.api_base).map_err(|e| {
            LhammaiError::Config(format!(
                "Invalid api_base '{}': {}",
                self.provider.api_base, e
            ))
        })?;

        if !matches!(api_base.scheme(), "http" | "https") {
            return Err(LhammaiError::Config(format!(
                "URL scheme should be 'http' or 'https', got '{}'",
                api_base.scheme()
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.provider.model, "ollama:gemma3:4b");
        assert_eq!(config.provider.api_base, "http://localhost:11434");
        assert!(config.history.auto_save);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_yaml_uses_defaults() {
        let yaml = r#"
provider:
  model: ollama:llama3.2:latest
history:
  file: /tmp/lhammai/history.json
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.provider.model, "ollama:llama3.2:latest");
        assert_eq!(config.provider.api_base, "http://localhost:11434");
        assert_eq!(
            config.history.file,
            Some(PathBuf::from("/tmp/lhammai/history.json"))
        );
        assert!(config.history.auto_save);
    }

    #[test]
    fn test_validate_accepts_model_with_tag() {
        let mut config = Config::default();
        config.provider.model = "ollama:test-model:latest".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_slash_separated_model() {
        let mut config = Config::default();
        config.provider.model = "ollama/gemma3:4b".to_string();
        assert_eq!(config.provider.split_model(), Some(("ollama", "gemma3:4b")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_split_model_uses_first_separator() {
        let mut provider = ProviderConfig::default();
        provider.model = "ollama:library/llama3".to_string();
        assert_eq!(provider.split_model(), Some(("ollama", "library/llama3")));

        provider.model = "ollama/".to_string();
        assert_eq!(provider.split_model(), None);
    }

    #[test]
    fn test_validate_rejects_invalid_model_format() {
        let mut config = Config::default();
        config.provider.model = "invalid-model-format".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid model format"));
    }

    #[test]
    fn test_validate_rejects_unsupported_provider() {
        let mut config = Config::default();
        config.provider.model = "unsupported:model:latest".to_string();
        let err = config.validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("'unsupported' is not a supported provider."));
    }

    #[test]
    fn test_validate_rejects_non_http_api_base() {
        let mut config = Config::default();
        config.provider.api_base = "ftp://localhost:11434".to_string();
        let err = config.validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("URL scheme should be 'http' or 'https'"));
    }

    #[test]
    fn test_resolve_file_prefers_configured_path() {
        let history = HistoryConfig {
            file: Some(PathBuf::from("/tmp/custom.json")),
            auto_save: true,
        };
        assert_eq!(
            history.resolve_file().unwrap(),
            PathBuf::from("/tmp/custom.json")
        );
    }

    #[test]
    fn test_with_provider_overrides() {
        let config = Config::default().with_provider_overrides(
            Some("ollama:llama3".to_string()),
            Some("http://remote:11434".to_string()),
        );
        assert_eq!(config.provider.model, "ollama:llama3");
        assert_eq!(config.provider.api_base, "http://remote:11434");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("LHAMMAI_MODEL", "ollama:env-model");
        std::env::set_var("LHAMMAI_API_BASE", "http://env-host:11434");
        std::env::set_var("LHAMMAI_AUTO_SAVE", "false");

        let mut config = Config::default();
        config.apply_env_vars();

        std::env::remove_var("LHAMMAI_MODEL");
        std::env::remove_var("LHAMMAI_API_BASE");
        std::env::remove_var("LHAMMAI_AUTO_SAVE");

        assert_eq!(config.provider.model, "ollama:env-model");
        assert_eq!(config.provider.api_base, "http://env-host:11434");
        assert!(!config.history.auto_save);
    }

    #[test]
    #[serial]
    fn test_bare_api_base_env_is_honored() {
        std::env::remove_var("LHAMMAI_API_BASE");
        std::env::set_var("API_BASE", "http://legacy:11434");

        let mut config = Config::default();
        config.apply_env_vars();

        std::env::remove_var("API_BASE");
        assert_eq!(config.provider.api_base, "http://legacy:11434");
    }
}
