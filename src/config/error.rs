//! Configuration error types.

use thiserror::Error;

/// Errors while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors from semantic validation of loaded configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(&'static str),

    #[error("DATABASE_URL must be a postgres:// or postgresql:// URL")]
    InvalidDatabaseUrl,

    #[error("Database pool min_connections must not exceed max_connections")]
    InvalidPoolSize,

    #[error("Database pool max_connections must not exceed 100")]
    PoolSizeTooLarge,

    #[error("Server port must be non-zero")]
    InvalidPort,

    #[error("Anthropic API keys start with 'sk-ant-'")]
    InvalidApiKey,
}
