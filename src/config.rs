//! Application configuration.
//!
//! Defaults reproduce the fixed window of the desktop version: title,
//! width limits and minimum height. An optional JSON file can override them;
//! a missing file means "use the defaults".

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "persona-table.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}

/// Window limits in pixels, converted to terminal cells through a nominal
/// cell size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub dialog_title: String,
    pub max_width: u16,
    pub min_width: u16,
    pub min_height: u16,
    pub cell_width: u16,
    pub cell_height: u16,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Persona Table".to_string(),
            dialog_title: "New Person".to_string(),
            max_width: 840,
            min_width: 565,
            min_height: 325,
            cell_width: 8,
            cell_height: 16,
        }
    }
}

impl WindowConfig {
    pub fn min_columns(&self) -> u16 {
        self.min_width / self.cell_width
    }

    pub fn max_columns(&self) -> u16 {
        self.max_width / self.cell_width
    }

    pub fn min_rows(&self) -> u16 {
        self.min_height / self.cell_height
    }

    fn validate(&self) -> Result<()> {
        if self.cell_width == 0 || self.cell_height == 0 {
            bail!("window.cell_width and window.cell_height must be positive");
        }
        if self.min_width > self.max_width {
            bail!(
                "window.min_width ({}) exceeds window.max_width ({})",
                self.min_width,
                self.max_width
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,

    /// Log destination; the terminal belongs to the UI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: Some(PathBuf::from("persona-table.log")),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(text)?;
        config.window.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_fixed_window() {
        let window = WindowConfig::default();

        assert_eq!(window.max_width, 840);
        assert_eq!(window.min_width, 565);
        assert_eq!(window.min_height, 325);
        assert_eq!(window.min_columns(), 70);
        assert_eq!(window.max_columns(), 105);
        assert_eq!(window.min_rows(), 20);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.json")).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "window": {{ "title": "Staff" }}, "logging": {{ "level": "debug" }} }}"#)
            .unwrap();

        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.window.title, "Staff");
        assert_eq!(config.window.max_width, 840);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, LoggingConfig::default().file);
    }

    #[test]
    fn test_inconsistent_limits_are_rejected() {
        let err = AppConfig::from_json(r#"{ "window": { "min_width": 900 } }"#).unwrap_err();
        assert!(err.to_string().contains("min_width"));

        assert!(AppConfig::from_json(r#"{ "window": { "cell_width": 0 } }"#).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(AppConfig::load(file.path()).is_err());
    }
}
