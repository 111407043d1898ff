use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Log level used when neither the config file nor the environment sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "VERSION_GATE_LOG";

const APP_DIR_NAME: &str = "version-gate";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Application configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub log: LogConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `version_gate=debug`
    pub level: String,
    pub format: LogFormat,
    /// Write to [`log_path`] instead of stderr
    pub to_file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::default(),
            to_file: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl AppConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Returns the path to the data directory for version-gate.
/// Uses $XDG_DATA_HOME/version-gate if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-gate,
/// or ./version-gate if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("version-gate.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn app_config_from_empty_object_uses_defaults() {
        let result = serde_json::from_value::<AppConfig>(json!({})).unwrap();

        assert_eq!(result, AppConfig::default());
        assert_eq!(result.log.level, "info");
        assert_eq!(result.log.format, LogFormat::Text);
        assert!(!result.log.to_file);
    }

    #[test]
    fn app_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<AppConfig>(json!({
            "log": {
                "level": "version_gate=debug",
                "format": "json",
                "toFile": true
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            AppConfig {
                log: LogConfig {
                    level: "version_gate=debug".to_string(),
                    format: LogFormat::Json,
                    to_file: true,
                }
            }
        );
    }

    #[test]
    fn app_config_rejects_unknown_format() {
        let result = serde_json::from_value::<AppConfig>(json!({
            "log": { "format": "xml" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn from_path_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"log": {{"level": "warn"}}}}"#).unwrap();

        let config = AppConfig::from_path(file.path()).unwrap();

        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::from_path(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/version-gate"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/version-gate"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./version-gate"));
    }
}
