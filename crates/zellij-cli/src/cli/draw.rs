//! The `draw` command: tile a motif, join the paths, and render.

use std::fs;
use std::path::{Path as FsPath, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use zellij::{
    BadGeometry, ChainStats, DrawingConfig, Motif, Path, PathTiler, StrokeStyle, Surface,
    combine_paths, stroke_paths, tile,
};

use super::png::write_png;
use super::svg::SvgSurface;

/// Arguments for `zellij draw`.
#[derive(Args, Debug, Default)]
pub struct DrawArgs {
    /// YAML drawing config; flags below override it
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Output file (.png or .svg); defaults to <motif>.png
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Tile size in pixels
    #[arg(long)]
    pub tile_width: Option<f64>,

    /// Stroke width; replaces the configured styles with a single pass
    #[arg(long)]
    pub line_width: Option<f64>,

    /// Stroke the raw tile paths without joining them
    #[arg(long)]
    pub no_join: bool,

    /// Use each style's base color instead of random colors
    #[arg(long)]
    pub no_rainbow: bool,

    /// Seed for rainbow colors
    #[arg(long)]
    pub seed: Option<u64>,

    /// Motif to tile with (see `zellij motifs`)
    #[arg(long, value_parser = parse_motif)]
    pub motif: Option<Motif>,
}

fn parse_motif(name: &str) -> Result<Motif, String> {
    Motif::from_name(name).ok_or_else(|| {
        let known: Vec<_> = Motif::all().iter().map(|m| m.name()).collect();
        format!("unknown motif '{}' (known: {})", name, known.join(", "))
    })
}

/// Output format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &FsPath) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Png,
        }
    }
}

/// Build the effective config: file (or defaults), then flag overrides.
pub fn resolve_config(args: &DrawArgs) -> Result<DrawingConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from: {}", path.display());
            DrawingConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => DrawingConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(tile_width) = args.tile_width {
        config.tile_width = Some(tile_width);
    }
    if let Some(motif) = args.motif {
        config.motif = motif;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.no_join {
        config.join = false;
    }
    if let Some(width) = args.line_width {
        config.styles = vec![StrokeStyle::rainbow(width)];
    }
    if args.no_rainbow {
        config.styles = config
            .effective_styles()
            .into_iter()
            .map(|style| StrokeStyle { rainbow: false, ..style })
            .collect();
    }

    config.validate().context("Invalid drawing options")?;
    Ok(config)
}

/// Tile the configured motif and return the recorded paths, joined if
/// the config asks for it.
pub fn build_paths(config: &DrawingConfig) -> Result<Vec<Path>, BadGeometry> {
    let tile_width = config.tile_width();
    let motif = config.motif;

    let started = Instant::now();
    let mut pt = PathTiler::new();
    let tiles = tile(&mut pt, &config.grid(), |pt| motif.draw(pt, tile_width))?;
    let paths = pt.into_paths();
    info!(
        "Tiled {} x {} canvas: {} tiles of {}px, {} paths in {:.1}ms",
        config.width,
        config.height,
        tiles,
        tile_width,
        paths.len(),
        started.elapsed().as_secs_f64() * 1000.0
    );

    if !config.join {
        return Ok(paths);
    }

    let started = Instant::now();
    let input_count = paths.len();
    let combined = combine_paths(paths);
    let stats = ChainStats::from_paths(input_count, &combined);
    info!(
        "Joined {} paths into {} ({} closed, {:.0}% fewer) in {:.1}ms",
        stats.input_paths,
        stats.output_paths,
        stats.closed_paths,
        stats.reduction_ratio * 100.0,
        started.elapsed().as_secs_f64() * 1000.0
    );
    debug!(
        "  Longest path: {} points, average {:.1}",
        stats.max_path_length, stats.avg_path_length
    );
    Ok(combined)
}

/// Stroke the paths with the configured styles and return the SVG text.
pub fn render_svg(config: &DrawingConfig, paths: &[Path]) -> String {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut surface = SvgSurface::new(config.width, config.height, config.background);
    surface.set_line_cap(config.line_cap);
    stroke_paths(&mut surface, paths, &config.effective_styles(), &mut rng);
    debug!("Stroked {} paths", surface.stroke_count());
    surface.finish()
}

/// Execute the draw command.
pub fn cmd_draw(args: &DrawArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.png", config.motif.name())));

    let paths = build_paths(&config)
        .with_context(|| format!("Failed to construct the {} motif", config.motif.name()))?;
    let svg = render_svg(&config, &paths);

    match OutputFormat::from_path(&output) {
        OutputFormat::Svg => {
            fs::write(&output, &svg).with_context(|| format!("Failed to write {}", output.display()))?;
        }
        OutputFormat::Png => {
            write_png(&svg, config.width, config.height, &output).context("Failed to render PNG")?;
        }
    }

    info!("Wrote: {} ({}x{})", output.display(), config.width, config.height);
    Ok(())
}
