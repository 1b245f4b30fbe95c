//! Configuration loading for Kindred services.
//!
//! Configuration is a small YAML document. Every field has a default, so an
//! empty document is valid:
//!
//! ```yaml
//! logging:
//!   level: "info"
//!   json: false
//! service:
//!   max_save_attempts: 3
//!   default_view_mode: "VERTICAL"
//! ```

use std::path::Path;

use serde::Deserialize;

use kindred_types::ViewMode;

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "KINDRED_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KindredConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Tree service settings.
    #[serde(default)]
    pub service: ServiceConfig,
}

impl KindredConfig {
    /// Load configuration from a YAML file.
    ///
    /// `KINDRED_LOG_LEVEL` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.logging.apply_env_overrides();
        Ok(config)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression). `RUST_LOG` still wins at runtime.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Apply `KINDRED_LOG_LEVEL` if it is set.
    pub fn apply_env_overrides(&mut self) {
        self.override_level(std::env::var(LOG_LEVEL_ENV).ok());
    }

    fn override_level(&mut self, level: Option<String>) {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.level = level;
        }
    }
}

/// Tree service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// How many load-modify-save cycles a command may run before giving up
    /// on a contended tree. Zero is treated as one.
    #[serde(default = "default_max_save_attempts")]
    pub max_save_attempts: u32,

    /// View mode used when a render request does not name one.
    #[serde(default)]
    pub default_view_mode: ViewMode,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_save_attempts: default_max_save_attempts(),
            default_view_mode: ViewMode::default(),
        }
    }
}

impl ServiceConfig {
    /// Effective attempt count, never below one.
    pub fn attempts(&self) -> u32 {
        self.max_save_attempts.max(1)
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_max_save_attempts() -> u32 {
    3
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_document() {
        let config: KindredConfig = serde_yml::from_str("{}").unwrap();
        assert_eq!(config, KindredConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.service.max_save_attempts, 3);
        assert_eq!(config.service.default_view_mode, ViewMode::Vertical);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
logging:
  level: "debug"
  json: true
service:
  max_save_attempts: 5
  default_view_mode: "RADIAL"
"#;
        let config: KindredConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.service.max_save_attempts, 5);
        assert_eq!(config.service.default_view_mode, ViewMode::Radial);
    }

    #[test]
    fn parse_partial_section_keeps_other_defaults() {
        let config: KindredConfig =
            serde_yml::from_str("service:\n  max_save_attempts: 7\n").unwrap();
        assert_eq!(config.service.max_save_attempts, 7);
        assert_eq!(config.service.default_view_mode, ViewMode::Vertical);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn invalid_yaml_is_reported() {
        let result = KindredConfig::parse("service: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn unknown_view_mode_is_rejected() {
        let result = KindredConfig::parse("service:\n  default_view_mode: \"SPIRAL\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = KindredConfig::from_file(Path::new("/nonexistent/kindred.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn zero_attempts_means_one() {
        let config = ServiceConfig {
            max_save_attempts: 0,
            ..ServiceConfig::default()
        };
        assert_eq!(config.attempts(), 1);
    }

    #[test]
    fn level_override_ignores_blank_values() {
        let mut logging = LoggingConfig::default();
        logging.override_level(Some("  ".to_owned()));
        assert_eq!(logging.level, "info");
        logging.override_level(Some("warn".to_owned()));
        assert_eq!(logging.level, "warn");
        logging.override_level(None);
        assert_eq!(logging.level, "warn");
    }
}
