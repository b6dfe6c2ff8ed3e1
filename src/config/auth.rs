//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Token signing, session cookie, and credential hashing settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC key for access tokens
    pub access_token_secret: SecretString,

    /// HMAC key for refresh tokens; must differ from the access key
    pub refresh_token_secret: SecretString,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl_secs: u64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_token_ttl")]
    pub refresh_token_ttl_secs: u64,

    /// Clock skew tolerated when checking `exp`
    #[serde(default = "default_token_leeway")]
    pub token_leeway_secs: u64,

    /// Mark session cookies `Secure`
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,

    /// Minimum accepted password length
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,

    /// Argon2id cost parameters
    #[serde(default)]
    pub argon2: Argon2Settings,
}

/// Argon2id cost parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Argon2Settings {
    /// Memory cost in KiB
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,

    /// Iterations
    #[serde(default = "default_time_cost")]
    pub time_cost: u32,

    /// Lanes
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Argon2Settings {
    /// Low-cost parameters for tests (fast, not for production use)
    pub fn testing() -> Self {
        Self {
            memory_kib: 4096,
            time_cost: 1,
            parallelism: 1,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.time_cost == 0 || self.parallelism == 0 {
            return Err(ValidationError::InvalidArgon2Params);
        }
        // argon2 requires at least 8 KiB per lane
        if self.memory_kib < 8 * self.parallelism {
            return Err(ValidationError::InvalidArgon2Params);
        }
        Ok(())
    }
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            time_cost: default_time_cost(),
            parallelism: default_parallelism(),
        }
    }
}

impl AuthConfig {
    /// Get access token lifetime as Duration
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_secs)
    }

    /// Get refresh token lifetime as Duration
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_secs)
    }

    /// Validate authentication configuration
    ///
    /// In production, requires long secrets and `Secure` cookies.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let access = self.access_token_secret.expose_secret();
        let refresh = self.refresh_token_secret.expose_secret();

        if access.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ACCESS_TOKEN_SECRET"));
        }
        if refresh.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__REFRESH_TOKEN_SECRET"));
        }
        if access == refresh {
            return Err(ValidationError::TokenSecretsMustDiffer);
        }
        if self.access_token_ttl_secs == 0
            || self.access_token_ttl_secs >= self.refresh_token_ttl_secs
        {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.password_min_length < 6 {
            return Err(ValidationError::PasswordPolicyTooWeak);
        }
        self.argon2.validate()?;

        if *environment == Environment::Production {
            if access.len() < MIN_PRODUCTION_SECRET_LEN || refresh.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::TokenSecretTooShort);
            }
            if !self.cookie_secure {
                return Err(ValidationError::InsecureCookies);
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: SecretString::new(String::new()),
            refresh_token_secret: SecretString::new(String::new()),
            access_token_ttl_secs: default_access_token_ttl(),
            refresh_token_ttl_secs: default_refresh_token_ttl(),
            token_leeway_secs: default_token_leeway(),
            cookie_secure: default_cookie_secure(),
            password_min_length: default_password_min_length(),
            argon2: Argon2Settings::default(),
        }
    }
}

fn default_access_token_ttl() -> u64 {
    15 * 60
}

fn default_refresh_token_ttl() -> u64 {
    10 * 24 * 60 * 60
}

fn default_token_leeway() -> u64 {
    5
}

fn default_cookie_secure() -> bool {
    true
}

fn default_password_min_length() -> usize {
    8
}

fn default_memory_kib() -> u32 {
    65536
}

fn default_time_cost() -> u32 {
    3
}

fn default_parallelism() -> u32 {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string())
    }

    fn valid_config() -> AuthConfig {
        AuthConfig {
            access_token_secret: secret("a".repeat(32).as_str()),
            refresh_token_secret: secret("r".repeat(32).as_str()),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_ttl(), Duration::from_secs(900));
        assert_eq!(config.refresh_token_ttl(), Duration::from_secs(864_000));
        assert!(config.cookie_secure);
        assert_eq!(config.argon2.memory_kib, 65536);
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig::default();
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__ACCESS_TOKEN_SECRET"))
        ));
    }

    #[test]
    fn test_validation_secrets_must_differ() {
        let config = AuthConfig {
            access_token_secret: secret("same-secret"),
            refresh_token_secret: secret("same-secret"),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::TokenSecretsMustDiffer)
        ));
    }

    #[test]
    fn test_validation_access_ttl_must_be_shorter() {
        let config = AuthConfig {
            access_token_ttl_secs: 1000,
            refresh_token_ttl_secs: 1000,
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_production_requires_long_secrets() {
        let config = AuthConfig {
            access_token_secret: secret("short-a"),
            refresh_token_secret: secret("short-r"),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::TokenSecretTooShort)
        ));
    }

    #[test]
    fn test_validation_production_requires_secure_cookies() {
        let config = AuthConfig {
            cookie_secure: false,
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_argon2_params() {
        let config = AuthConfig {
            argon2: Argon2Settings {
                memory_kib: 8,
                time_cost: 1,
                parallelism: 4,
            },
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidArgon2Params)
        ));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate(&Environment::Production).is_ok());
    }
}
