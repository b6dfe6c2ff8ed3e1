//! Validated display attributes of a principal.
//!
//! Usernames and emails are unique store-wide, so both are normalised
//! (trimmed, lower-cased) before they ever reach a repository. Full names
//! keep their casing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 30;
const EMAIL_MAX: usize = 254;
const FULL_NAME_MAX: usize = 100;

/// Normalised, unique handle. Doubles as the channel name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = raw.as_ref().trim().to_lowercase();
        if value.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        let len = value.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
            return Err(ValidationError::length_out_of_range(
                "username",
                USERNAME_MIN,
                USERNAME_MAX,
                len,
            ));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.')
        {
            return Err(ValidationError::invalid_format(
                "username",
                "only letters, digits, '_' and '.' are allowed",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalised email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = raw.as_ref().trim().to_lowercase();
        if value.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if value.len() > EMAIL_MAX {
            return Err(ValidationError::length_out_of_range(
                "email",
                3,
                EMAIL_MAX,
                value.len(),
            ));
        }
        let (local, domain) = value
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing @ symbol"))?;
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || !domain.contains('.')
            || value.chars().any(char::is_whitespace)
        {
            return Err(ValidationError::invalid_format("email", "not a valid address"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullName(String);

impl FullName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(ValidationError::empty_field("full_name"));
        }
        let len = value.chars().count();
        if len > FULL_NAME_MAX {
            return Err(ValidationError::length_out_of_range(
                "full_name",
                1,
                FULL_NAME_MAX,
                len,
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
