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

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Access and refresh token secrets must differ")]
    TokenSecretsMustDiffer,

    #[error("Token secrets must be at least 32 bytes in production")]
    TokenSecretTooShort,

    #[error("Access token TTL must be non-zero and shorter than refresh token TTL")]
    InvalidTokenTtl,

    #[error("Session cookies must be Secure in production")]
    InsecureCookies,

    #[error("Minimum password length is too low")]
    PasswordPolicyTooWeak,

    #[error("Invalid Argon2 parameters")]
    InvalidArgon2Params,

    #[error("Media staging and storage directories must differ")]
    MediaDirectoriesOverlap,
}
