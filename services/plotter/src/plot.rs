//! Drive one compositor run from a manifest to a PNG file.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::io::BufWriter;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use compositor::{Tile, TileCompositor};
use plot_common::PlotConfig;

use crate::manifest::TileManifest;

/// Tiles decoded in parallel before being fed serially to the compositor.
const DECODE_BATCH: usize = 64;

/// Emit a progress log line every this many tiles.
const PROGRESS_LOG_INTERVAL: u64 = 500;

/// Outcome of a plot run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotStats {
    pub tiles: usize,
    pub width: u32,
    pub height: u32,
}

/// Composite every manifest tile and write the PNG to `output`.
///
/// The image is written to a temporary file next to `output` and renamed
/// into place only after encoding succeeds, so a failed run never leaves a
/// truncated artifact behind.
pub fn plot(config: &PlotConfig, manifest: &TileManifest, output: &Path) -> Result<PlotStats> {
    let (mbr, width, height) = config.validate()?;
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let staging = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create staging file in {}", dir.display()))?;
    let sink = BufWriter::new(
        staging
            .reopen()
            .context("Failed to open staging file for writing")?,
    );

    let accepted = AtomicU64::new(0);
    let heartbeat = || {
        let n = accepted.fetch_add(1, Ordering::Relaxed) + 1;
        if n % PROGRESS_LOG_INTERVAL == 0 {
            info!(tiles = n, total = manifest.len(), "Compositing progress");
        }
    };

    let mut compositor = TileCompositor::with_progress(heartbeat);
    compositor.initialize(sink, width as i64, height as i64, mbr, config.vflip)?;

    for batch in manifest.tiles.chunks(DECODE_BATCH) {
        let tiles: Vec<Tile> = batch
            .par_iter()
            .map(|entry| -> Result<Tile> {
                let bytes = fs::read(&entry.path)
                    .with_context(|| format!("Failed to read tile {}", entry.path.display()))?;
                Ok(Tile::from_png_bytes(entry.cell, &bytes)?)
            })
            .collect::<Result<_>>()?;

        for tile in tiles {
            compositor.accept_tile(tile)?;
        }
        debug!(batch = batch.len(), "Composited tile batch");
    }

    let sink = compositor.finish()?;
    drop(sink);
    staging
        .persist(output)
        .with_context(|| format!("Failed to move plot into {}", output.display()))?;

    Ok(PlotStats {
        tiles: manifest.len(),
        width,
        height,
    })
}
