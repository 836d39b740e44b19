//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Semantic problems found in a loaded configuration
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid password reset URL")]
    InvalidResetUrl,

    #[error("Password reset URL must use HTTPS in production")]
    ResetUrlMustBeHttps,

    #[error("Reset token lifetime must be between 1 minute and 24 hours")]
    InvalidResetTokenTtl,

    #[error("Minimum password length must be at least 6")]
    PasswordPolicyTooWeak,

    #[error("Invalid from email address")]
    InvalidFromEmail,
}
