//! Geospatial tile compositing.
//!
//! Merges independently rendered cell tiles into one RGBA canvas covering the
//! dataset MBR and writes it out as a single lossless PNG:
//! - [`mapping`]: geographic rectangle to pixel placement
//! - [`canvas`]: the raster buffer and its clipping composite
//! - [`compositor`]: lifecycle, progress signalling and final encode
//! - [`png`]: indexed/RGBA PNG encoder

pub mod canvas;
pub mod compositor;
pub mod mapping;
pub mod png;
pub mod progress;
pub mod shared;
pub mod tile;

pub use canvas::Canvas;
pub use compositor::{CompositorState, TileCompositor};
pub use mapping::{round_to_pixel, PixelMapping, PixelRect};
pub use progress::{NoProgress, Progress, ProgressCounter};
pub use shared::SharedCompositor;
pub use tile::Tile;
