//! Media storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Local media storage settings
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Directory uploads are staged in before they are stored
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// Directory stored media is written to
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// URL prefix stored media is served under
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl MediaConfig {
    /// Validate media configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.public_base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MEDIA__PUBLIC_BASE_URL"));
        }
        if self.staging_dir == self.root_dir {
            return Err(ValidationError::MediaDirectoriesOverlap);
        }
        Ok(())
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            staging_dir: default_staging_dir(),
            root_dir: default_root_dir(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from("./public/temp")
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("./public/media")
}

fn default_public_base_url() -> String {
    "/media".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_config_defaults_are_valid() {
        let config = MediaConfig::default();
        assert_eq!(config.public_base_url, "/media");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_same_directories() {
        let config = MediaConfig {
            staging_dir: PathBuf::from("/srv/media"),
            root_dir: PathBuf::from("/srv/media"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_blank_base_url() {
        let config = MediaConfig {
            public_base_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
