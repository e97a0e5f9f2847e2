//! Configuration management for docnode

use crate::error::{DocNodeError, Result};
use crate::types::{DEFAULT_NORMALIZED_ID_MAX_LEN, MIN_NORMALIZED_ID_LEN};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-local configuration file, relative to the working directory
pub const LOCAL_CONFIG_PATH: &str = ".docnode/config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Entity model settings
    pub model: ModelConfig,
    /// Inspect command settings
    pub inspect: InspectConfig,
}

/// Entity model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Maximum normalized id length before a hash suffix is used
    pub normalized_id_max_len: usize,
    /// Collect `<seealso>` nodes into entity links
    pub collect_see_also: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            normalized_id_max_len: DEFAULT_NORMALIZED_ID_MAX_LEN,
            collect_see_also: true,
        }
    }
}

/// Inspect command configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Output JSON instead of a listing
    pub json: bool,
    /// Pretty-print JSON output
    pub pretty_json: bool,
    /// Show remarks in the listing
    pub show_remarks: bool,
    /// Truncate descriptions in the listing to this many characters (0 = no limit)
    pub max_description_len: usize,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            json: false,
            pretty_json: true,
            show_remarks: false,
            max_description_len: 80,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DocNodeError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| DocNodeError::from(e).with_context(path.display().to_string()))?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve and load configuration
    ///
    /// An explicit path must exist. Otherwise the project-local file is tried,
    /// then the user config file, then defaults are used.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_PATH);
        if local.exists() {
            return Self::load(&local);
        }

        if let Some(user) = Self::user_config_path() {
            if user.exists() {
                return Self::load(&user);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Location of the per-user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "docnode", "docnode")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Write configuration as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.model.normalized_id_max_len < MIN_NORMALIZED_ID_LEN {
            return Err(DocNodeError::Config(format!(
                "model.normalized_id_max_len must be at least {}, got {}",
                MIN_NORMALIZED_ID_LEN, self.model.normalized_id_max_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.model.normalized_id_max_len,
            DEFAULT_NORMALIZED_ID_MAX_LEN
        );
        assert!(config.model.collect_see_also);
        assert!(!config.inspect.json);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[model]"));
        assert!(toml.contains("[inspect]"));

        let config2: Config = toml::from_str(&toml).unwrap();
        assert_eq!(
            config.inspect.max_description_len,
            config2.inspect.max_description_len
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[inspect]\njson = true\n").unwrap();
        assert!(config.inspect.json);
        assert!(config.inspect.pretty_json);
        assert!(config.model.collect_see_also);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.model.normalized_id_max_len = 64;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.model.normalized_id_max_len, 64);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(DocNodeError::FileNotFound(_))));
    }

    #[test]
    fn test_discover_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[model]\ncollect_see_also = false\n").unwrap();

        let config = Config::discover(Some(&path)).unwrap();
        assert!(!config.model.collect_see_also);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[model]\nnormalized_id_max_len = 4\n").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(DocNodeError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[model\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
