//! Geographic rectangle to canvas pixel mapping.
//!
//! Every producer that sizes or places a tile for the same artifact must use
//! this mapping, so that adjacent cells meet on the same pixel boundary no
//! matter which worker rendered them.

use plot_common::config::validate_dimensions;
use plot_common::{BoundingBox, PlotError, PlotResult};

/// Round a real-valued pixel coordinate to the canvas grid.
///
/// Half-way values round away from zero (`f64::round`). This is the single
/// rounding rule used for every placement; it introduces up to ±0.5px of
/// placement error that must stay identical across producers.
///
/// Infinities saturate to `i64::MIN`/`i64::MAX` and NaN maps to 0, so a cell
/// with a NaN coordinate is placed on the canvas' first column or row.
#[inline]
pub fn round_to_pixel(value: f64) -> i64 {
    value.round() as i64
}

/// A rectangle on the canvas pixel grid. May extend outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Maps geographic rectangles onto a `width`×`height` canvas spanning `mbr`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMapping {
    mbr: BoundingBox,
    width: u32,
    height: u32,
    vflip: bool,
}

impl PixelMapping {
    /// Validate and build a mapping.
    ///
    /// Fails with `InvalidDimension` for non-positive sizes and with
    /// `InvalidConfig` when the MBR has no usable extent.
    pub fn new(mbr: BoundingBox, width: i64, height: i64, vflip: bool) -> PlotResult<Self> {
        let (width, height) = validate_dimensions(width, height)?;
        if mbr.is_degenerate() {
            return Err(PlotError::InvalidConfig(format!(
                "degenerate MBR {}: width and height must be positive",
                mbr
            )));
        }
        Ok(Self {
            mbr,
            width,
            height,
            vflip,
        })
    }

    pub fn mbr(&self) -> &BoundingBox {
        &self.mbr
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn vflip(&self) -> bool {
        self.vflip
    }

    fn scale_x(&self, x: f64) -> f64 {
        (x - self.mbr.min_x) * self.width as f64 / self.mbr.width()
    }

    /// Row of a geographic Y value measured from the reference edge.
    ///
    /// Without vflip the MBR's min_y is row 0 (Y grows down the image).
    /// With vflip the MBR's max_y is row 0 and the axis is inverted.
    fn scale_y(&self, y: f64) -> f64 {
        if self.vflip {
            (-y - -self.mbr.max_y) * self.height as f64 / self.mbr.height()
        } else {
            (y - self.mbr.min_y) * self.height as f64 / self.mbr.height()
        }
    }

    /// Pixel position of a cell's top-left corner on the canvas.
    pub fn tile_origin(&self, cell: &BoundingBox) -> (i64, i64) {
        let x = round_to_pixel(self.scale_x(cell.min_x));
        let top = if self.vflip { cell.max_y } else { cell.min_y };
        let y = round_to_pixel(self.scale_y(top));
        (x, y)
    }

    /// Rounded pixel footprint of a cell.
    ///
    /// Both corners are rounded independently, so neighbouring cells share
    /// an edge pixel boundary exactly. Producers use `width`/`height` of the
    /// result to size their tile.
    pub fn pixel_rect(&self, cell: &BoundingBox) -> PixelRect {
        let (x, y) = self.tile_origin(cell);
        let x_end = round_to_pixel(self.scale_x(cell.max_x));
        let bottom = if self.vflip { cell.min_y } else { cell.max_y };
        let y_end = round_to_pixel(self.scale_y(bottom));
        PixelRect {
            x,
            y,
            width: x_end - x,
            height: y_end - y,
        }
    }
}
