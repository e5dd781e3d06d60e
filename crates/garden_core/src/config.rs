//! Runtime configuration for hosts embedding the garden core.
//!
//! # Responsibility
//! - Describe where notes live and how core logs.
//! - Read settings from process environment with build-mode defaults.
//!
//! # Invariants
//! - `content_dir` is never empty.
//! - `log_dir`, when set, is absolute (same rule as `init_logging`).

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_CONTENT_DIR: &str = "GARDEN_CONTENT_DIR";
pub const ENV_LOG_LEVEL: &str = "GARDEN_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GARDEN_LOG_DIR";

/// Garden core settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GardenConfig {
    /// Directory holding note markdown files.
    pub content_dir: PathBuf,
    /// `trace|debug|info|warn|error`.
    #[serde(default = "default_level_string")]
    pub log_level: String,
    /// Rolling log directory. Logging stays off when absent.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required setting was not provided.
    Missing(&'static str),
    /// Setting is present but unusable.
    Invalid { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing required setting `{key}`"),
            Self::Invalid { key, message } => write!(f, "invalid setting `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {}

impl GardenConfig {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            log_level: default_level_string(),
            log_dir: None,
        }
    }

    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings from the process environment, with `content_dir`
    /// (when given) taking the place of `GARDEN_CONTENT_DIR`.
    pub fn from_env_with_content_dir(content_dir: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup_with_content_dir(|key| std::env::var(key).ok(), content_dir)
    }

    /// Like `from_lookup`, but `content_dir` overrides only the content
    /// directory; every other setting still comes from `lookup`.
    pub fn from_lookup_with_content_dir(
        lookup: impl Fn(&str) -> Option<String>,
        content_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(|key: &str| match &content_dir {
            Some(dir) if key == ENV_CONTENT_DIR => Some(dir.clone()),
            _ => lookup(key),
        })
    }

    /// Reads settings through `lookup`, then validates them.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let content_dir = read(ENV_CONTENT_DIR).ok_or(ConfigError::Missing(ENV_CONTENT_DIR))?;
        let config = Self {
            content_dir: PathBuf::from(content_dir.trim()),
            log_level: read(ENV_LOG_LEVEL)
                .map(|value| value.trim().to_string())
                .unwrap_or_else(default_level_string),
            log_dir: read(ENV_LOG_DIR).map(|value| PathBuf::from(value.trim())),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks settings that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_dir.as_os_str().is_empty() {
            return Err(ConfigError::Missing(ENV_CONTENT_DIR));
        }
        if let Some(log_dir) = &self.log_dir {
            if !log_dir.is_absolute() {
                return Err(ConfigError::Invalid {
                    key: ENV_LOG_DIR,
                    message: format!("`{}` is not an absolute path", log_dir.display()),
                });
            }
        }
        Ok(())
    }
}

fn default_level_string() -> String {
    default_log_level().to_string()
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GardenConfig, ENV_CONTENT_DIR, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn content_dir_is_required() {
        let err = GardenConfig::from_lookup(lookup(&[(ENV_CONTENT_DIR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(ENV_CONTENT_DIR));
    }

    #[test]
    fn defaults_fill_optional_settings() {
        let config = GardenConfig::from_lookup(lookup(&[(ENV_CONTENT_DIR, "content/notes")]))
            .unwrap();
        assert_eq!(config.content_dir, PathBuf::from("content/notes"));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = GardenConfig::from_lookup(lookup(&[
            (ENV_CONTENT_DIR, "notes"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_LOG_DIR, "logs"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENV_LOG_DIR));
    }

    #[test]
    fn content_dir_override_keeps_logging_settings() {
        let env = lookup(&[
            (ENV_CONTENT_DIR, "from-env"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_DIR, "/var/log/garden"),
        ]);
        let config =
            GardenConfig::from_lookup_with_content_dir(env, Some("cli/notes".to_string()))
                .unwrap();
        assert_eq!(config.content_dir, PathBuf::from("cli/notes"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/garden")));
    }

    #[test]
    fn content_dir_override_satisfies_missing_env() {
        let env = lookup(&[(ENV_LOG_LEVEL, "warn")]);
        let config =
            GardenConfig::from_lookup_with_content_dir(env, Some("notes".to_string())).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("notes"));
        assert_eq!(config.log_level, "warn");

        let err = GardenConfig::from_lookup_with_content_dir(lookup(&[]), None).unwrap_err();
        assert_eq!(err, ConfigError::Missing(ENV_CONTENT_DIR));
    }
}
