//! Configuration management for acetrack.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Profile;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "acetrack";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "acetrack.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ACETRACK_`)
/// 2. TOML config file at `~/.config/acetrack/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Report export configuration.
    pub export: ExportConfig,
    /// Profile used to seed a fresh document.
    pub profile: ProfileConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/acetrack/acetrack.db`
    pub database_path: Option<PathBuf>,
}

/// Export-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory reports and backups are written to when no file is given.
    pub output_dir: PathBuf,
    /// strftime format for the timestamp column.
    pub timestamp_format: String,
    /// Render timestamps in local time rather than UTC.
    pub local_time: bool,
}

/// Initial player profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Player name.
    pub name: String,
    /// Jersey number.
    pub number: String,
    /// Court position.
    pub position: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            local_time: true,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "My Player".to_string(),
            number: "10".to_string(),
            position: "Outside Hitter".to_string(),
        }
    }
}

impl ProfileConfig {
    /// Build a fresh profile from these settings.
    #[must_use]
    pub fn to_profile(&self) -> Profile {
        Profile::new(&self.name, &self.number, &self.position)
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `ACETRACK_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("ACETRACK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let format = self.export.timestamp_format.trim();
        if format.is_empty() {
            return Err(Error::ConfigValidation {
                message: "timestamp_format cannot be empty".to_string(),
            });
        }

        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::ConfigValidation {
                message: format!("invalid timestamp_format: {format}"),
            });
        }

        if self.profile.name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "profile.name cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Resolve where an export should be written.
    ///
    /// An explicit path wins; otherwise the default file name is placed in
    /// the configured output directory.
    #[must_use]
    pub fn output_path(&self, explicit: Option<PathBuf>, default_name: &str) -> PathBuf {
        explicit.unwrap_or_else(|| self.export.output_dir.join(default_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert!(config.export.local_time);
        assert_eq!(config.profile.position, "Outside Hitter");
    }

    #[test]
    fn test_default_export_config() {
        let export = ExportConfig::default();

        assert_eq!(export.output_dir, PathBuf::from("."));
        assert_eq!(export.timestamp_format, "%Y-%m-%d %H:%M:%S");
        assert!(export.local_time);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_timestamp_format() {
        let mut config = Config::default();
        config.export.timestamp_format = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("timestamp_format"));
    }

    #[test]
    fn test_validate_bad_timestamp_format() {
        let mut config = Config::default();
        config.export.timestamp_format = "%Y-%Q".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("invalid timestamp_format"));
    }

    #[test]
    fn test_validate_blank_profile_name() {
        let mut config = Config::default();
        config.profile.name = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        let path = config.database_path();

        assert!(path.to_string_lossy().contains("acetrack.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_output_path() {
        let mut config = Config::default();
        config.export.output_dir = PathBuf::from("/reports");

        assert_eq!(
            config.output_path(None, "a.csv"),
            PathBuf::from("/reports/a.csv")
        );
        assert_eq!(
            config.output_path(Some(PathBuf::from("b.csv")), "a.csv"),
            PathBuf::from("b.csv")
        );
    }

    #[test]
    fn test_profile_config_seeds_profile() {
        let profile = ProfileConfig::default().to_profile();
        assert_eq!(profile.name, "My Player");
        assert_eq!(profile.tracked_stats.len(), 19);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("acetrack"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[export]\nlocal_time = false\n\n[profile]\nname = \"Jordan\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert!(!config.export.local_time);
        assert_eq!(config.profile.name, "Jordan");
        assert_eq!(config.profile.number, "10");
    }

    #[test]
    fn test_export_config_deserialize() {
        let json = r#"{"timestamp_format": "%H:%M"}"#;
        let export: ExportConfig = serde_json::from_str(json).unwrap();
        assert_eq!(export.timestamp_format, "%H:%M");
        assert!(export.local_time);
    }
}
