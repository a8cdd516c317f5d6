//! The output raster for one plot artifact.

use image::{Rgba, RgbaImage};
use std::io::Write;

use plot_common::config::validate_dimensions;
use plot_common::{PlotError, PlotResult};

use crate::png;

/// An RGBA canvas covering the dataset MBR.
///
/// Starts fully transparent. The only mutation is [`Canvas::composite_at`],
/// which overwrites a rectangular region and silently clips anything that
/// falls outside the canvas.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Allocate a transparent canvas. Both dimensions must be positive and
    /// the pixel buffer must fit in memory addressing.
    pub fn new(width: u32, height: u32) -> PlotResult<Self> {
        let (width, height) = validate_dimensions(width as i64, height as i64)?;
        Ok(Self {
            image: RgbaImage::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at (x, y), or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.width() && y < self.height() {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }

    /// Borrow the underlying image.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Copy `tile` onto the canvas with its top-left pixel at
    /// (`origin_x`, `origin_y`).
    ///
    /// Source pixels replace destination pixels, alpha included. Rows and
    /// columns landing outside the canvas are dropped. Returns the number of
    /// pixels actually written.
    pub fn composite_at(&mut self, origin_x: i64, origin_y: i64, tile: &RgbaImage) -> usize {
        let (tile_w, tile_h) = tile.dimensions();
        let canvas_w = self.width() as i64;
        let canvas_h = self.height() as i64;

        let x0 = origin_x.max(0);
        let y0 = origin_y.max(0);
        let x1 = origin_x.saturating_add(tile_w as i64).min(canvas_w);
        let y1 = origin_y.saturating_add(tile_h as i64).min(canvas_h);
        if x0 >= x1 || y0 >= y1 {
            return 0;
        }

        let src_x = (x0 - origin_x) as usize;
        let row_bytes = (x1 - x0) as usize * 4;
        let src_stride = tile_w as usize * 4;
        let dst_stride = canvas_w as usize * 4;

        let src: &[u8] = tile.as_raw();
        let dst: &mut [u8] = &mut self.image;

        for y in y0..y1 {
            let src_start = (y - origin_y) as usize * src_stride + src_x * 4;
            let dst_start = y as usize * dst_stride + x0 as usize * 4;
            dst[dst_start..dst_start + row_bytes]
                .copy_from_slice(&src[src_start..src_start + row_bytes]);
        }

        (x1 - x0) as usize * (y1 - y0) as usize
    }

    /// Serialize the whole canvas as PNG into `sink`.
    ///
    /// Returns the number of bytes written. Failures from the sink or the
    /// encoder surface as [`PlotError::Encode`] and are not retried.
    pub fn encode<W: Write>(&self, sink: &mut W) -> PlotResult<usize> {
        png::write_png(
            sink,
            self.image.as_raw(),
            self.width() as usize,
            self.height() as usize,
        )
        .map_err(PlotError::Encode)
    }
}
