// Fri Oct 16 2026 - Alex

use crate::memory::ViewWidth;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width in bits used by `start` when none is given.
    pub default_width: u32,
    pub log_level: String,
    /// How many candidate offsets to print while still narrowing.
    pub candidate_preview: usize,
    pub use_color: bool,
    pub buffer_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_width: 16,
            log_level: "info".to_string(),
            candidate_preview: 8,
            use_color: true,
            buffer_path: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer_path(mut self, path: PathBuf) -> Self {
        self.buffer_path = Some(path);
        self
    }

    pub fn with_default_width(mut self, bits: u32) -> Self {
        self.default_width = bits;
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case("json") {
            return Err(ConfigError::UnsupportedFormat(ext.to_string()));
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ViewWidth::from_bits(self.default_width)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.candidate_preview == 0 {
            return Err(ConfigError::Validation(
                "candidate_preview must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn width(&self) -> ViewWidth {
        ViewWidth::from_bits(self.default_width).unwrap_or(ViewWidth::W16)
    }
}
