//! Tile generators producing predictable, verifiable pixel patterns.

use image::{Rgba, RgbaImage};

/// A tile filled with a single colour.
pub fn solid_tile(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// A tile whose every pixel encodes its own position.
///
/// Pixel (x, y) is `[x % 256, y % 256, tag, 255]`, so after compositing the
/// source pixel of any canvas position can be read back directly.
pub fn coordinate_tile(width: u32, height: u32, tag: u8) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, tag, 255])
    })
}

/// Transparent tile with a one pixel opaque border.
pub fn outline_tile(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
            Rgba(color)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Count pixels in `image` equal to `color` inside the half-open rectangle.
pub fn count_color(
    image: &RgbaImage,
    color: [u8; 4],
    (x0, y0): (u32, u32),
    (x1, y1): (u32, u32),
) -> usize {
    let mut count = 0;
    for y in y0..y1.min(image.height()) {
        for x in x0..x1.min(image.width()) {
            if image.get_pixel(x, y).0 == color {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_tile() {
        let tile = coordinate_tile(300, 2, 7);
        assert_eq!(tile.get_pixel(1, 1).0, [1, 1, 7, 255]);
        assert_eq!(tile.get_pixel(257, 0).0, [1, 0, 7, 255]);
    }

    #[test]
    fn test_outline_tile() {
        let tile = outline_tile(3, 3, [9, 9, 9, 255]);
        assert_eq!(count_color(&tile, [9, 9, 9, 255], (0, 0), (3, 3)), 8);
        assert_eq!(tile.get_pixel(1, 1).0, [0, 0, 0, 0]);
    }
}
