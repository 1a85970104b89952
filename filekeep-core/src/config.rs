use crate::error::SerialError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Widest zero padding accepted for new serials
pub const MAX_PAD_WIDTH: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub reserial: SerialConfig,

    #[serde(default)]
    pub retime: TimeConfig,
}

/// Settings for the serial renamer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Folder to scan; the command line usually supplies it
    #[serde(default)]
    pub target_folder: Option<PathBuf>,

    /// Width the new serial is zero-padded to (3 gives 001, 002, ...)
    #[serde(default = "default_pad_width")]
    pub pad_width: usize,

    /// Inserted between the padded serial and the remainder
    #[serde(default = "default_connector")]
    pub connector: String,

    /// Prepended to every output filename
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Added to every reversed serial, may be negative
    #[serde(default)]
    pub base_serial: i64,

    /// Characters allowed between the leading serial and the remainder
    #[serde(default = "default_separators")]
    pub separators: Vec<char>,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            target_folder: None,
            pad_width: default_pad_width(),
            connector: default_connector(),
            prefix: default_prefix(),
            base_serial: 0,
            separators: default_separators(),
        }
    }
}

impl SerialConfig {
    pub fn validate(&self) -> Result<(), SerialError> {
        if self.pad_width == 0 {
            return Err(SerialError::InvalidConfig(
                "pad_width must be at least 1".to_string(),
            ));
        }
        if self.pad_width > MAX_PAD_WIDTH {
            return Err(SerialError::InvalidConfig(format!(
                "pad_width must be at most {MAX_PAD_WIDTH}, got {}",
                self.pad_width
            )));
        }
        if self.separators.is_empty() {
            return Err(SerialError::InvalidConfig(
                "at least one separator is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the timestamp editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConfig {
    /// chrono strftime pattern used to parse every time argument
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
        }
    }
}

fn default_pad_width() -> usize {
    3
}

fn default_connector() -> String {
    ". ".to_string()
}

fn default_prefix() -> String {
    "No.".to_string()
}

fn default_separators() -> Vec<char> {
    vec!['.', '、', ' ']
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

impl Config {
    /// Load config from .filekeep/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(".filekeep").join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }
}
