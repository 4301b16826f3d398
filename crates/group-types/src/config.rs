//! Configuration loading for the group packager host.
//!
//! The packager itself has no options. These settings only shape how the
//! command-line host logs and prints.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at `~/.config/group-packager/config.toml`
//! (platform equivalent via `directories`).

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::GroupTypesError;

/// Application name used for the config directory
pub const APP_NAME: &str = "group-packager";

/// Prefix for environment overrides (`GROUPPACK_LOG_LEVEL`, `GROUPPACK_PRETTY`)
pub const ENV_PREFIX: &str = "GROUPPACK";

/// Host settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            pretty: false,
        }
    }
}

impl Settings {
    /// Default config file location, without extension
    pub fn default_config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config")
    }

    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Default config file (optional)
    /// 3. CLI-specified config file (required if given)
    /// 4. Environment variables (GROUPPACK_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, GroupTypesError> {
        let default_config_path = Self::default_config_path();

        let mut builder = Config::builder()
            .set_default("log_level", default_log_level())
            .map_err(|e| GroupTypesError::Config(e.to_string()))?
            .set_default("pretty", false)
            .map_err(|e| GroupTypesError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // GROUPPACK_LOG_LEVEL -> log_level; nested keys would use "__"
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| GroupTypesError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| GroupTypesError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, "warn");
        assert!(!settings.pretty);
    }

    #[test]
    fn test_load_from_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();
        writeln!(file, "pretty = true").unwrap();

        let settings = Settings::load(Some(&file.path().to_string_lossy())).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert!(settings.pretty);
    }

    #[test]
    fn test_load_partial_config_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "pretty = true").unwrap();

        let settings = Settings::load(Some(&file.path().to_string_lossy())).unwrap();
        assert!(settings.pretty);
        assert!(!settings.log_level.is_empty());
    }

    #[test]
    fn test_load_missing_cli_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = Settings::load(Some(&missing.to_string_lossy()));
        assert!(matches!(result, Err(GroupTypesError::Config(_))));
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let decoded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, settings);
    }
}
