//! Tile compositor: places cell tiles onto one canvas and emits the artifact.
//!
//! Lifecycle is `Uninitialized -> Open -> Closed`:
//!
//! ```ignore
//! let mut compositor = TileCompositor::new();
//! compositor.initialize(Vec::new(), 200, 200, mbr, false)?;
//! for tile in tiles {
//!     compositor.accept(&tile.cell, &tile.image)?;
//! }
//! let png_bytes = compositor.finish()?;
//! ```
//!
//! One compositor owns exactly one canvas and one sink. It performs no
//! locking; wrap it in [`crate::SharedCompositor`] when several producers
//! deliver tiles concurrently.

use image::RgbaImage;
use std::io::Write;
use tracing::{debug, trace, warn};

use plot_common::{BoundingBox, PlotConfig, PlotError, PlotResult};

use crate::canvas::Canvas;
use crate::mapping::PixelMapping;
use crate::progress::{NoProgress, Progress};
use crate::tile::Tile;

/// Observable lifecycle state of a [`TileCompositor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositorState {
    Uninitialized,
    Open,
    Closed,
}

struct OpenCanvas<W> {
    canvas: Canvas,
    mapping: PixelMapping,
    sink: W,
    tiles_accepted: u64,
}

enum State<W> {
    Uninitialized,
    Open(OpenCanvas<W>),
    Closed,
}

/// Accumulates tiles onto a single canvas and writes it to `W` on finish.
pub struct TileCompositor<W: Write, P: Progress = NoProgress> {
    state: State<W>,
    progress: P,
}

impl<W: Write> TileCompositor<W, NoProgress> {
    pub fn new() -> Self {
        Self::with_progress(NoProgress)
    }
}

impl<W: Write> Default for TileCompositor<W, NoProgress> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write, P: Progress> TileCompositor<W, P> {
    /// Create an uninitialized compositor reporting heartbeats to `progress`.
    pub fn with_progress(progress: P) -> Self {
        Self {
            state: State::Uninitialized,
            progress,
        }
    }

    /// Create and initialize a compositor from a validated configuration.
    pub fn open(sink: W, config: &PlotConfig, progress: P) -> PlotResult<Self> {
        let (mbr, width, height) = config.validate()?;
        let mut compositor = Self::with_progress(progress);
        compositor.initialize(sink, width as i64, height as i64, mbr, config.vflip)?;
        Ok(compositor)
    }

    /// Allocate the canvas and take ownership of the output sink.
    ///
    /// Fails with `InvalidDimension` if either size is not positive, with
    /// `InvalidConfig` for a degenerate MBR, and with `AlreadyInitialized`
    /// if called twice.
    pub fn initialize(
        &mut self,
        sink: W,
        width: i64,
        height: i64,
        mbr: BoundingBox,
        vflip: bool,
    ) -> PlotResult<()> {
        match self.state {
            State::Uninitialized => {}
            State::Open(_) => return Err(PlotError::AlreadyInitialized),
            State::Closed => return Err(PlotError::ClosedCompositor),
        }

        let mapping = PixelMapping::new(mbr, width, height, vflip)?;
        let canvas = Canvas::new(mapping.width(), mapping.height())?;

        debug!(
            width = mapping.width(),
            height = mapping.height(),
            mbr = %mbr,
            vflip,
            "Opened plot canvas"
        );

        self.state = State::Open(OpenCanvas {
            canvas,
            mapping,
            sink,
            tiles_accepted: 0,
        });
        Ok(())
    }

    pub fn state(&self) -> CompositorState {
        match self.state {
            State::Uninitialized => CompositorState::Uninitialized,
            State::Open(_) => CompositorState::Open,
            State::Closed => CompositorState::Closed,
        }
    }

    /// The active mapping, while open.
    pub fn mapping(&self) -> Option<&PixelMapping> {
        match &self.state {
            State::Open(open) => Some(&open.mapping),
            _ => None,
        }
    }

    /// The canvas being built, while open.
    pub fn canvas(&self) -> Option<&Canvas> {
        match &self.state {
            State::Open(open) => Some(&open.canvas),
            _ => None,
        }
    }

    /// Number of tiles accepted so far, while open.
    pub fn tiles_accepted(&self) -> Option<u64> {
        match &self.state {
            State::Open(open) => Some(open.tiles_accepted),
            _ => None,
        }
    }

    /// Composite one tile covering `cell` onto the canvas.
    ///
    /// Emits a heartbeat before doing any work. Portions of the tile that
    /// land off-canvas are dropped without error. There is no
    /// deduplication: a repeated cell overwrites the same region.
    pub fn accept(&mut self, cell: &BoundingBox, tile: &RgbaImage) -> PlotResult<()> {
        self.progress.progress();

        let open = match &mut self.state {
            State::Open(open) => open,
            State::Uninitialized => return Err(PlotError::Uninitialized),
            State::Closed => return Err(PlotError::ClosedCompositor),
        };

        let (x, y) = open.mapping.tile_origin(cell);
        let written = open.canvas.composite_at(x, y, tile);
        open.tiles_accepted += 1;

        trace!(
            cell = %cell,
            x,
            y,
            tile_width = tile.width(),
            tile_height = tile.height(),
            written,
            "Composited tile"
        );
        if written == 0 && tile.width() > 0 && tile.height() > 0 {
            warn!(cell = %cell, x, y, "Tile fell entirely outside the canvas");
        }
        Ok(())
    }

    /// Composite an owned [`Tile`]; the tile is dropped afterwards.
    pub fn accept_tile(&mut self, tile: Tile) -> PlotResult<()> {
        self.accept(&tile.cell, &tile.image)
    }

    /// Encode the canvas into the sink, release the canvas and hand the sink
    /// back to the caller.
    ///
    /// The compositor is `Closed` afterwards whether or not encoding
    /// succeeded; a failed canvas cannot be re-encoded.
    pub fn finish(&mut self) -> PlotResult<W> {
        let mut open = match std::mem::replace(&mut self.state, State::Closed) {
            State::Open(open) => open,
            State::Uninitialized => {
                self.state = State::Uninitialized;
                return Err(PlotError::Uninitialized);
            }
            State::Closed => return Err(PlotError::ClosedCompositor),
        };

        let bytes = open.canvas.encode(&mut open.sink)?;
        debug!(
            tiles = open.tiles_accepted,
            bytes,
            width = open.canvas.width(),
            height = open.canvas.height(),
            "Wrote plot image"
        );
        Ok(open.sink)
    }
}

impl<W: Write, P: Progress> Drop for TileCompositor<W, P> {
    fn drop(&mut self) {
        if let State::Open(open) = &self.state {
            warn!(
                tiles = open.tiles_accepted,
                "Compositor dropped without finish; plot image discarded"
            );
        }
    }
}
