//! TOML-based user configuration.
//!
//! Stores defaults the CLI falls back to when flags are omitted: catalog
//! paths, the wake/bed window, day type, hydration interval, and an
//! optional RNG seed. Stored at `~/.config/fuelday/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

fn default_wake() -> String {
    "06:30".to_string()
}

fn default_bed() -> String {
    "23:00".to_string()
}

fn default_day_type() -> String {
    "classes".to_string()
}

fn default_interval() -> i64 {
    120
}

/// User configuration.
///
/// Serialized to/from TOML at `~/.config/fuelday/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default food catalog path.
    #[serde(default)]
    pub foods_path: Option<PathBuf>,
    /// Default template catalog path.
    #[serde(default)]
    pub templates_path: Option<PathBuf>,
    /// Wake time, HH:MM.
    #[serde(default = "default_wake")]
    pub wake: String,
    /// Bed time, HH:MM.
    #[serde(default = "default_bed")]
    pub bed: String,
    /// Default day type (tournament, classes, rest).
    #[serde(default = "default_day_type")]
    pub day_type: String,
    #[serde(default = "default_interval")]
    pub hydration_interval_minutes: i64,
    /// Fixed RNG seed for reproducible plans.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            foods_path: None,
            templates_path: None,
            wake: default_wake(),
            bed: default_bed(),
            day_type: default_day_type(),
            hydration_interval_minutes: default_interval(),
            seed: None,
        }
    }
}

impl Config {
    /// Path of the configuration file.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fuelday")
            .join("config.toml")
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        Self::load_from(&Self::path()).unwrap_or_default()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_missing_fields() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.wake, "06:30");
        assert_eq!(config.bed, "23:00");
        assert_eq!(config.day_type, "classes");
        assert_eq!(config.hydration_interval_minutes, 120);
        assert!(config.seed.is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.foods_path = Some(PathBuf::from("data/foods.json"));
        config.seed = Some(42);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.foods_path, Some(PathBuf::from("data/foods.json")));
        assert_eq!(loaded.seed, Some(42));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let err = Config::load_from(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { .. }));
    }
}
