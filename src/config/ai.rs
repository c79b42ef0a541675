//! AI collaborator configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ConfigValidationError;

/// AI collaborator configuration (Anthropic)
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Anthropic API key
    pub anthropic_api_key: Secret<String>,

    /// Model to use for both collaborators
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Per-call token budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl AiConfig {
    /// Exposes the API key for building the engine.
    pub fn api_key(&self) -> &str {
        self.anthropic_api_key.expose_secret()
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let key = self.anthropic_api_key.expose_secret();
        if key.is_empty() {
            return Err(ConfigValidationError::MissingRequired("ANTHROPIC_API_KEY"));
        }
        if !key.starts_with("sk-ant-") {
            return Err(ConfigValidationError::InvalidApiKey);
        }
        Ok(())
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_tokens() -> u32 {
    2048
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: &str) -> AiConfig {
        AiConfig {
            anthropic_api_key: Secret::new(key.to_string()),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
        }
    }

    #[test]
    fn accepts_well_formed_key() {
        assert!(config("sk-ant-abc123").validate().is_ok());
    }

    #[test]
    fn rejects_empty_key() {
        assert!(config("").validate().is_err());
    }

    #[test]
    fn rejects_foreign_key_format() {
        assert!(config("sk-proj-xyz").validate().is_err());
    }

    #[test]
    fn timeout_converts_to_duration() {
        assert_eq!(config("sk-ant-x").timeout(), Duration::from_secs(60));
    }
}
