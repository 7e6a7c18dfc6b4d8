//! Provider configuration.
//!
//! # Invariants
//! - Every field has a default, so an empty JSON object is a valid config.
//! - A missing `database_path` selects an in-memory database.

use crate::repo::pet_repo::DbLocation;
use crate::resource::ResourceMatcher;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTHORITY: &str = "com.example.android.pets";
pub const DEFAULT_COLLECTION: &str = "pets";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub authority: String,
    pub collection: String,
    pub database_path: Option<PathBuf>,
    /// One of `trace|debug|info|warn|error`; `None` uses the build default.
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files; `None` uses the temp dir.
    pub log_dir: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            authority: DEFAULT_AUTHORITY.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            database_path: None,
            log_level: None,
            log_dir: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    /// A field holds a value the provider cannot use.
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl ProviderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("authority", &self.authority),
            ("collection", &self.collection),
        ] {
            if value.trim().is_empty() || value.contains('/') {
                return Err(ConfigError::Invalid(format!(
                    "`{field}` must be a non-empty single path segment, got `{value}`"
                )));
            }
        }
        Ok(())
    }

    pub fn matcher(&self) -> ResourceMatcher {
        ResourceMatcher::new(self.authority.as_str(), self.collection.as_str())
    }

    pub fn db_location(&self) -> DbLocation {
        match &self.database_path {
            Some(path) => DbLocation::File(path.clone()),
            None => DbLocation::Memory,
        }
    }

    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(crate::logging::default_log_level())
    }

    pub fn effective_log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("pets").join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ProviderConfig, DEFAULT_AUTHORITY};
    use crate::repo::pet_repo::DbLocation;
    use std::path::PathBuf;

    #[test]
    fn empty_object_uses_defaults() {
        let config = ProviderConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ProviderConfig::default());
        assert_eq!(config.authority, DEFAULT_AUTHORITY);
        assert_eq!(config.db_location(), DbLocation::Memory);
    }

    #[test]
    fn database_path_selects_file_location() {
        let config =
            ProviderConfig::from_json_str(r#"{"database_path": "/tmp/pets.db"}"#).unwrap();
        assert_eq!(
            config.db_location(),
            DbLocation::File(PathBuf::from("/tmp/pets.db"))
        );
    }

    #[test]
    fn collection_with_slash_is_rejected() {
        let err = ProviderConfig::from_json_str(r#"{"collection": "pets/1"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn log_settings_fall_back_to_build_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(
            config.effective_log_level(),
            crate::logging::default_log_level()
        );
        assert!(config.effective_log_dir().is_absolute());

        let configured =
            ProviderConfig::from_json_str(r#"{"log_level": "warn", "log_dir": "/var/log/pets"}"#)
                .unwrap();
        assert_eq!(configured.effective_log_level(), "warn");
        assert_eq!(configured.effective_log_dir(), PathBuf::from("/var/log/pets"));
    }
}
