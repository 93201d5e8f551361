//! Tile motifs.
//!
//! A motif draws one tile in tile-local coordinates through a
//! [`PathTiler`]; the tile driver repeats it across the canvas.

mod breathing;

pub use breathing::{breathing_strap, draw_breathing};

use serde::{Deserialize, Serialize};

use crate::geometry::BadGeometry;
use crate::tiler::PathTiler;

/// Available motifs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motif {
    #[default]
    Breathing,
}

impl Motif {
    /// Get all available motifs.
    pub fn all() -> &'static [Motif] {
        &[Motif::Breathing]
    }

    /// Get motif name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Motif::Breathing => "breathing",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            Motif::Breathing => "Bent straps joining edge midpoints around a rotated square",
        }
    }

    /// Parse motif from string.
    pub fn from_name(name: &str) -> Option<Motif> {
        match name.to_lowercase().as_str() {
            "breathing" => Some(Motif::Breathing),
            _ => None,
        }
    }

    /// Draw one tile of this motif.
    pub fn draw(&self, pt: &mut PathTiler, tile_width: f64) -> Result<(), BadGeometry> {
        match self {
            Motif::Breathing => draw_breathing(pt, tile_width),
        }
    }
}
