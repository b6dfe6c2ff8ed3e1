//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `VIEWPOINT` prefix and
//! `__` between nesting levels.
//!
//! # Example
//!
//! ```no_run
//! use viewpoint::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod media;
mod server;

pub use auth::{Argon2Settings, AuthConfig};
pub use database::{DatabaseConfig, PoolConfig};
pub use error::{ConfigError, ValidationError};
pub use media::MediaConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Token, cookie and credential hashing configuration
    pub auth: AuthConfig,

    /// Media staging and storage
    #[serde(default)]
    pub media: MediaConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `VIEWPOINT__*` variables:
    ///
    /// - `VIEWPOINT__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `VIEWPOINT__AUTH__ACCESS_TOKEN_SECRET=...` -> `auth.access_token_secret`
    /// - `VIEWPOINT__AUTH__ARGON2__MEMORY_KIB=19456` -> `auth.argon2.memory_kib`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into their expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VIEWPOINT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.media.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("VIEWPOINT__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("VIEWPOINT__AUTH__ACCESS_TOKEN_SECRET", "access-secret-for-tests");
        env::set_var("VIEWPOINT__AUTH__REFRESH_TOKEN_SECRET", "refresh-secret-for-tests");
    }

    fn clear_env() {
        for key in [
            "VIEWPOINT__DATABASE__URL",
            "VIEWPOINT__AUTH__ACCESS_TOKEN_SECRET",
            "VIEWPOINT__AUTH__REFRESH_TOKEN_SECRET",
            "VIEWPOINT__AUTH__ACCESS_TOKEN_TTL_SECS",
            "VIEWPOINT__SERVER__PORT",
            "VIEWPOINT__SERVER__ENVIRONMENT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(
            config.database.url.expose_secret(),
            "postgresql://test@localhost/test"
        );
        assert_eq!(
            config.auth.access_token_secret.expose_secret(),
            "access-secret-for-tests"
        );
    }

    #[test]
    fn test_validate_minimal_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.auth.access_token_ttl_secs, 900);
        assert_eq!(config.media.public_base_url, "/media");
    }

    #[test]
    fn test_numeric_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("VIEWPOINT__SERVER__PORT", "3000");
        env::set_var("VIEWPOINT__AUTH__ACCESS_TOKEN_TTL_SECS", "60");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.access_token_ttl_secs, 60);
    }

    #[test]
    fn test_production_rejects_short_secrets() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("VIEWPOINT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::TokenSecretTooShort)
        ));
    }

    #[test]
    fn test_missing_auth_section_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("VIEWPOINT__DATABASE__URL", "postgresql://test@localhost/test");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
