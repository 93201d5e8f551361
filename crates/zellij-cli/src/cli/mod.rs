//! CLI command implementations.
//!
//! - `draw` - Tile a motif and write it as PNG or SVG
//! - `motifs` - List available motifs (handled in main)

pub mod draw;
pub mod png;
pub mod svg;

pub use draw::{DrawArgs, cmd_draw};
