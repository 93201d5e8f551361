//! zellij - draw Islamic strapwork tilings
//!
//! Usage:
//!   zellij draw [-o out.png] [--config drawing.yaml] [options]
//!   zellij draw -o out.svg --tile-width 100 --seed 7
//!   zellij motifs

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use cli::{DrawArgs, cmd_draw};
use zellij::Motif;

/// Draw Islamic strapwork tilings
#[derive(Parser, Debug)]
#[command(name = "zellij")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tile a motif across a canvas and write a PNG or SVG
    Draw(DrawArgs),

    /// List available motifs
    Motifs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        LevelFilter::Debug
    } else if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Draw(args) => cmd_draw(&args),
        Commands::Motifs => {
            cmd_motifs();
            Ok(())
        }
    }
}

fn cmd_motifs() {
    println!("Available motifs:");
    for motif in Motif::all() {
        println!("  {:<12} {}", motif.name(), motif.description());
    }
}
