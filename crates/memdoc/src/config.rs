//! Configuration management for memdoc.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::DEFAULT_PREVIEW_CHARS;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "memdoc";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `MEMDOC_`)
/// 2. TOML config file at `~/.config/memdoc/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document configuration.
    pub document: DocumentConfig,
    /// List configuration.
    pub list: ListConfig,
}

/// Document-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Path to the memory document.
    /// Defaults to `~/.claude/CLAUDE.md`.
    pub path: Option<PathBuf>,
}

/// List-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Number of characters shown in a content preview.
    pub preview_chars: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
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
            .merge(Env::prefixed("MEMDOC_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default document path (`~/.claude/CLAUDE.md`).
    #[must_use]
    pub fn default_document_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".claude")
            .join("CLAUDE.md")
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.list.preview_chars == 0 {
            return Err(Error::ConfigValidation {
                message: "preview_chars must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Get the document path, resolving the default if not set.
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.document
            .path
            .clone()
            .unwrap_or_else(Self::default_document_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.document.path.is_none());
        assert_eq!(config.list.preview_chars, DEFAULT_PREVIEW_CHARS);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_preview_chars() {
        let mut config = Config::default();
        config.list.preview_chars = 0;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("preview_chars"));
    }

    #[test]
    fn test_document_path_default() {
        let config = Config::default();
        let path = config.document_path();
        assert!(path.to_string_lossy().contains("CLAUDE.md"));
    }

    #[test]
    fn test_document_path_custom() {
        let mut config = Config::default();
        config.document.path = Some(PathBuf::from("/custom/notes.md"));
        assert_eq!(config.document_path(), PathBuf::from("/custom/notes.md"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("memdoc"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults).
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "memdoc_config_test_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[document]\npath = \"/tmp/doc.md\"\n\n[list]\npreview_chars = 40\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.document.path, Some(PathBuf::from("/tmp/doc.md")));
        assert_eq!(config.list.preview_chars, 40);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_invalid_preview_chars() {
        let path = std::env::temp_dir().join(format!(
            "memdoc_config_invalid_test_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[list]\npreview_chars = 0\n").unwrap();

        let result = Config::load_from(Some(path.clone()));
        assert!(result.is_err());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("preview_chars"));
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
