//! Runtime configuration loaded from the environment.
//!
//! # Responsibility
//! - Resolve store location and logging settings for embedding processes.
//!
//! # Invariants
//! - Blank variables count as unset.
//! - `log_level` is always a normalized supported level.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "NOTEFUL_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "NOTEFUL_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTEFUL_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "noteful.sqlite3";

/// Core runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// Rolling log directory. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel { value: String, message: String },
    LogDirNotAbsolute(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel { value, message } => {
                write!(f, "invalid {ENV_LOG_LEVEL} `{value}`: {message}")
            }
            Self::LogDirNotAbsolute(value) => {
                write!(f, "{ENV_LOG_DIR} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

impl CoreConfig {
    /// Loads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level)
                .map_err(|message| ConfigError::InvalidLogLevel { value: level, message })?;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(ConfigError::LogDirNotAbsolute(dir));
            }
            config.log_dir = Some(path);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn load(pairs: &[(&str, &str)]) -> Result<CoreConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(load(&[]).unwrap(), CoreConfig::default());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[(ENV_DB_PATH, "  "), (ENV_LOG_LEVEL, ""), (ENV_LOG_DIR, " ")]).unwrap();
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn values_are_read_and_normalized() {
        let log_dir = std::env::temp_dir().join("noteful-config-test");
        let config = load(&[
            (ENV_DB_PATH, "/tmp/notes.sqlite3"),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, log_dir.to_str().unwrap()),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/notes.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(log_dir));
    }

    #[test]
    fn invalid_level_is_rejected() {
        let err = load(&[(ENV_LOG_LEVEL, "loud")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel { ref value, .. } if value == "loud"));
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = load(&[(ENV_LOG_DIR, "logs")]).unwrap_err();
        assert_eq!(err, ConfigError::LogDirNotAbsolute("logs".to_string()));
    }
}
