//! Mutual-exclusion wrapper for tiles delivered by concurrent producers.

use image::RgbaImage;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use plot_common::{BoundingBox, PlotError, PlotResult};

use crate::compositor::{CompositorState, TileCompositor};
use crate::progress::Progress;
use crate::tile::Tile;

/// Cloneable handle serializing `accept`/`finish` on one compositor.
///
/// Every clone refers to the same canvas. Composite order between threads is
/// whatever order the lock is acquired in; tiles for distinct cells land on
/// the same pixels regardless.
pub struct SharedCompositor<W: Write, P: Progress> {
    inner: Arc<Mutex<TileCompositor<W, P>>>,
}

impl<W: Write, P: Progress> Clone for SharedCompositor<W, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write, P: Progress> SharedCompositor<W, P> {
    pub fn new(compositor: TileCompositor<W, P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(compositor)),
        }
    }

    fn lock(&self) -> PlotResult<MutexGuard<'_, TileCompositor<W, P>>> {
        self.inner.lock().map_err(|_| PlotError::LockPoisoned)
    }

    pub fn accept(&self, cell: &BoundingBox, tile: &RgbaImage) -> PlotResult<()> {
        self.lock()?.accept(cell, tile)
    }

    pub fn accept_tile(&self, tile: Tile) -> PlotResult<()> {
        self.lock()?.accept_tile(tile)
    }

    /// Finish the shared compositor. Only the first caller gets the sink;
    /// later callers receive `ClosedCompositor`.
    pub fn finish(&self) -> PlotResult<W> {
        self.lock()?.finish()
    }

    pub fn state(&self) -> PlotResult<CompositorState> {
        Ok(self.lock()?.state())
    }
}
