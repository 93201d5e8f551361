//! # zellij
//!
//! Geometry and path handling for Islamic-style strapwork tilings.
//!
//! The pipeline:
//! 1. A [`Motif`] draws one tile through a [`PathTiler`], using
//!    [`Line::intersect`] to find construction points.
//! 2. [`tile`] repeats the motif across the canvas; the tiler records every
//!    stroke as a [`Path`] in canvas coordinates.
//! 3. [`combine_paths`] joins paths that meet end to end.
//! 4. [`stroke_paths`] replays them onto any [`Surface`].
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod chain;
pub mod color;
pub mod config;
pub mod geometry;
pub mod motifs;
pub mod render;
pub mod tiler;

// Re-export common types at crate root for convenience.
pub use chain::{ChainConfig, ChainStats, combine_paths, combine_paths_with, paths_to_lines};
pub use color::{Rgb, hls_to_rgb, random_color};
pub use config::{ConfigError, DrawingConfig};
pub use geometry::{BadGeometry, EPSILON, Line, Point, along_the_way, collinear};
pub use motifs::Motif;
pub use render::{LineCap, StrokeStyle, Surface, replay_path, stroke_paths};
pub use tiler::{Path, PathTiler, SavedGuard, TileGrid, tile};
