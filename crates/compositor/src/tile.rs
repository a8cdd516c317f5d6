//! Tiles: independently rendered cell images tagged with their footprint.

use image::{ImageFormat, RgbaImage};

use plot_common::{BoundingBox, PlotError, PlotResult};

/// One cell's rendering, consumed once by the compositor.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Geographic footprint of the cell
    pub cell: BoundingBox,
    /// Rendered pixels, row-major RGBA
    pub image: RgbaImage,
}

impl Tile {
    pub fn new(cell: BoundingBox, image: RgbaImage) -> Self {
        Self { cell, image }
    }

    /// Wrap raw RGBA bytes. The buffer must hold exactly `width * height * 4` bytes.
    pub fn from_rgba(cell: BoundingBox, width: u32, height: u32, pixels: Vec<u8>) -> PlotResult<Self> {
        let len = pixels.len();
        let image = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            PlotError::InvalidTile(format!(
                "{} bytes cannot hold a {}x{} RGBA tile",
                len, width, height
            ))
        })?;
        Ok(Self { cell, image })
    }

    /// Decode a PNG-encoded tile. Any colour type is converted to RGBA.
    pub fn from_png_bytes(cell: BoundingBox, bytes: &[u8]) -> PlotResult<Self> {
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|e| PlotError::InvalidTile(format!("cannot decode tile for {}: {}", cell, e)))?
            .to_rgba8();
        Ok(Self { cell, image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
