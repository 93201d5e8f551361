//! Drawing configuration.
//!
//! Everything that shapes one drawing: canvas and tile size, which motif,
//! whether to join paths, and the stroke styles. Configs are YAML files;
//! any field left out takes its default.
//!
//! ```yaml
//! width: 800
//! height: 800
//! tile_width: 160
//! motif: breathing
//! join: true
//! line_cap: round
//! seed: 42
//! styles:
//!   - width: 40
//!     color: { r: 0, g: 0, b: 0 }
//!   - width: 30
//!     rainbow: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;
use crate::motifs::Motif;
use crate::render::{LineCap, StrokeStyle};
use crate::tiler::TileGrid;

/// Errors from loading or checking a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Parameters for one drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Tile size in pixels; `None` means a fifth of the width.
    pub tile_width: Option<f64>,
    /// Which motif to tile with.
    pub motif: Motif,
    /// Join paths that share endpoints before stroking.
    pub join: bool,
    /// Stroke end style.
    pub line_cap: LineCap,
    /// Canvas fill before stroking.
    pub background: Rgb,
    /// Seed for rainbow colors; random if unset.
    pub seed: Option<u64>,
    /// Stroke passes; empty means the default rainbow style.
    pub styles: Vec<StrokeStyle>,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            tile_width: None,
            motif: Motif::default(),
            join: true,
            line_cap: LineCap::Round,
            background: Rgb::WHITE,
            seed: None,
            styles: Vec::new(),
        }
    }
}

impl DrawingConfig {
    /// Parse a config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: DrawingConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Check sizes are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        let tile = self.tile_width();
        if !(tile.is_finite() && tile > 0.0) {
            return Err(ConfigError::Invalid(format!("tile width must be positive, got {}", tile)));
        }
        if let Some(style) = self
            .effective_styles()
            .iter()
            .find(|s| !(s.width.is_finite() && s.width > 0.0))
        {
            return Err(ConfigError::Invalid(format!(
                "stroke width must be positive, got {}",
                style.width
            )));
        }
        Ok(())
    }

    /// Tile size in pixels.
    pub fn tile_width(&self) -> f64 {
        self.tile_width.unwrap_or_else(|| (self.width / 5) as f64)
    }

    /// The grid of tile origins covering the canvas.
    pub fn grid(&self) -> TileGrid {
        TileGrid::square(self.width as f64, self.height as f64, self.tile_width())
    }

    /// The stroke passes to render, falling back to a single rainbow pass
    /// a little narrower than a quarter tile.
    pub fn effective_styles(&self) -> Vec<StrokeStyle> {
        if self.styles.is_empty() {
            vec![StrokeStyle::rainbow(self.tile_width() / 4.0 - 2.0)]
        } else {
            self.styles.clone()
        }
    }
}
