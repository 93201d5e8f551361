//! PNG output.
//!
//! The drawing is built as SVG first, then rasterised with resvg into a
//! tiny-skia pixmap, so both output formats come from the same strokes.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use resvg::usvg;
use thiserror::Error;
use tiny_skia::Pixmap;

/// Errors from rasterising or writing a PNG.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to parse generated SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("could not create a {0}x{1} pixmap")]
    Pixmap(u32, u32),

    #[error("failed to encode PNG: {0}")]
    Encode(String),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rasterise SVG text into a `width` x `height` pixmap.
pub fn rasterize(svg: &str, width: u32, height: u32) -> Result<Pixmap, RenderError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options)?;

    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Pixmap(width, height))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    debug!("rasterised {}x{} pixmap", width, height);
    Ok(pixmap)
}

/// Rasterise SVG text and write it as a PNG file.
pub fn write_png(svg: &str, width: u32, height: u32, path: &Path) -> Result<(), RenderError> {
    let pixmap = rasterize(svg, width, height)?;
    let bytes = pixmap.encode_png().map_err(|e| RenderError::Encode(e.to_string()))?;
    fs::write(path, bytes).map_err(|source| RenderError::Io { path: path.to_path_buf(), source })
}
