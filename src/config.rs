use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::PixelColor;
use crate::grid::{DEFAULT_CANVAS_SIZE, DEFAULT_WIDTH};

/// Name of the optional config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "pixel_sheet.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Startup settings for a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Cells per side of a new sheet
    pub default_width: usize,
    /// Edge length of the canvas in points
    pub canvas_size: f32,
    /// Color selected on startup, in any accepted textual form
    pub initial_color: String,
    pub file_name: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_WIDTH,
            canvas_size: DEFAULT_CANVAS_SIZE,
            initial_color: "#000000".to_owned(),
            file_name: "untitled.pxs".to_owned(),
        }
    }
}

impl SheetConfig {
    /// Reads a JSON config. Missing fields take their default.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`SheetConfig::load`] but falls back to defaults when the file
    /// is absent or unusable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_width == 0 {
            return Err(ConfigError::InvalidValue(
                "default_width must be at least 1".to_owned(),
            ));
        }
        if !self.canvas_size.is_finite() || self.canvas_size <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "canvas_size must be positive, got {}",
                self.canvas_size
            )));
        }
        self.initial_color
            .parse::<PixelColor>()
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        Ok(())
    }

    pub fn initial_color(&self) -> PixelColor {
        self.initial_color
            .parse()
            .unwrap_or(PixelColor::rgb(0, 0, 0))
    }
}
