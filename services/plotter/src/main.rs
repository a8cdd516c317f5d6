//! Plot compositor CLI.
//!
//! Reads a manifest of rendered cell tiles, composites them onto a single
//! canvas covering the plot MBR, and writes the result as one PNG.

mod manifest;
mod plot;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use plot_common::{BoundingBox, PlotConfig, PlotError};

use manifest::TileManifest;

#[derive(Parser, Debug)]
#[command(name = "plotter")]
#[command(about = "Composite rendered cell tiles into a single PNG plot")]
struct Args {
    /// Tile manifest (.yaml, .yml or .json)
    #[arg(short, long)]
    manifest: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "plot.png")]
    output: PathBuf,

    /// Plot configuration file (YAML)
    #[arg(short, long, env = "PLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Extra plot properties, e.g. `-D plot.vflip=true`
    #[arg(short = 'D', long = "property", value_name = "KEY=VALUE")]
    properties: Vec<String>,

    /// Plot MBR as "x1,y1,x2,y2" (default: union of manifest cells)
    #[arg(long)]
    mbr: Option<BoundingBox>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<i64>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<i64>,

    /// Flip the vertical axis so north is at the top (true/false)
    #[arg(long, action = ArgAction::Set)]
    vflip: Option<bool>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(err) = run(&args) {
        let code = exit_code(&err);
        error!(error = format!("{:#}", err), code, "Plot failed");
        std::process::exit(code);
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    info!(manifest = %args.manifest.display(), "Starting plotter");

    let manifest = TileManifest::load(&args.manifest)?;
    let config = resolve_config(args, &manifest)?;
    info!(
        mbr = ?config.file_mbr,
        width = config.image_width,
        height = config.image_height,
        vflip = config.vflip,
        tiles = manifest.len(),
        "Resolved plot configuration"
    );

    let stats = plot::plot(&config, &manifest, &args.output)?;
    info!(
        output = %args.output.display(),
        tiles = stats.tiles,
        width = stats.width,
        height = stats.height,
        "Plot written"
    );

    Ok(())
}

/// Merge defaults, config file, `-D` properties, environment and flags.
fn resolve_config(args: &Args, manifest: &TileManifest) -> Result<PlotConfig> {
    let mut config = match &args.config {
        Some(path) => PlotConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PlotConfig::default(),
    };

    config.apply_properties(&parse_properties(&args.properties)?)?;
    config.apply_env()?;

    if let Some(mbr) = args.mbr {
        config.file_mbr = Some(mbr);
    }
    if let Some(width) = args.width {
        config.image_width = width;
    }
    if let Some(height) = args.height {
        config.image_height = height;
    }
    if let Some(vflip) = args.vflip {
        config.vflip = vflip;
    }

    if config.file_mbr.is_none() {
        config.file_mbr = manifest.extent();
    }

    Ok(config)
}

/// Process exit code for a failed run.
///
/// 2 for bad configuration, 3 when the compositor lifecycle was driven out
/// of order, 1 for everything else (I/O, decoding, encoding).
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.chain().find_map(|cause| cause.downcast_ref::<PlotError>()) {
        Some(plot_err) if plot_err.is_config_error() => 2,
        Some(plot_err) if plot_err.is_lifecycle_error() => 3,
        _ => 1,
    }
}

fn parse_properties(raw: &[String]) -> Result<HashMap<String, String>> {
    raw.iter()
        .map(|kv| {
            let (key, value) = kv
                .split_once('=')
                .ok_or_else(|| anyhow!("Property '{}' is not in KEY=VALUE form", kv))?;
            Ok((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}
