//! Common rectangle and colour fixtures for compositor tests.

use plot_common::BoundingBox;

/// Common rectangle definitions for testing.
pub mod bbox {
    use super::BoundingBox;

    /// 100x100 square anchored at the origin
    pub const SQUARE_100: BoundingBox = BoundingBox {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 100.0,
        max_y: 100.0,
    };

    /// Global geographic extent (-180 to 180, -90 to 90)
    pub const GLOBAL: BoundingBox = BoundingBox {
        min_x: -180.0,
        min_y: -90.0,
        max_x: 180.0,
        max_y: 90.0,
    };

    /// Continental United States
    pub const CONUS: BoundingBox = BoundingBox {
        min_x: -130.0,
        min_y: 20.0,
        max_x: -60.0,
        max_y: 55.0,
    };

    /// Single point (degenerate)
    pub const POINT: BoundingBox = BoundingBox {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    };

    /// Inverted (min > max)
    pub const INVERTED: BoundingBox = BoundingBox {
        min_x: 10.0,
        min_y: 10.0,
        max_x: 5.0,
        max_y: 5.0,
    };
}

/// RGBA colours used across tests.
pub mod color {
    pub const RED: [u8; 4] = [255, 0, 0, 255];
    pub const GREEN: [u8; 4] = [0, 255, 0, 255];
    pub const BLUE: [u8; 4] = [0, 0, 255, 255];
    pub const HALF_YELLOW: [u8; 4] = [255, 255, 0, 128];
    pub const CLEAR: [u8; 4] = [0, 0, 0, 0];
}

/// Split `mbr` into a `cols` x `rows` grid of cells, row by row from min_y.
pub fn grid_cells(mbr: &BoundingBox, cols: usize, rows: usize) -> Vec<BoundingBox> {
    let cell_w = mbr.width() / cols as f64;
    let cell_h = mbr.height() / rows as f64;
    let mut cells = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            cells.push(BoundingBox::new(
                mbr.min_x + col as f64 * cell_w,
                mbr.min_y + row as f64 * cell_h,
                mbr.min_x + (col + 1) as f64 * cell_w,
                mbr.min_y + (row + 1) as f64 * cell_h,
            ));
        }
    }
    cells
}
