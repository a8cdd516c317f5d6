//! Tests for PNG encoding of composited canvases.
//!
//! Encoded output is decoded again with the `image` crate to check that both
//! the indexed and RGBA paths are lossless, alpha included.

use compositor::png::{create_png, create_png_auto, write_png, PNG_SIGNATURE};
use image::RgbaImage;
use test_utils::{color, coordinate_tile, outline_tile, FailingSink};

// ============================================================================
// Helper functions
// ============================================================================

/// A mostly transparent canvas with a few tile colours, like a sparse plot.
fn sparse_canvas(width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    for (x, y, px) in canvas.enumerate_pixels_mut() {
        if (x / 16 + y / 16) % 3 == 0 {
            px.0 = color::RED;
        } else if x % 5 == 0 {
            px.0 = color::HALF_YELLOW;
        }
    }
    canvas
}

fn decode(png: &[u8]) -> RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

/// Color type byte from the IHDR chunk.
fn color_type(png: &[u8]) -> u8 {
    // signature(8) + length(4) + "IHDR"(4) + width(4) + height(4) + depth(1)
    png[25]
}

// ============================================================================
// Basic PNG creation tests
// ============================================================================

#[test]
fn test_signature() {
    let png = create_png_auto(&[0, 0, 0, 0], 1, 1).unwrap();
    assert_eq!(&png[0..8], &PNG_SIGNATURE);
    assert!(png.ends_with(&[0xAE, 0x42, 0x60, 0x82])); // IEND CRC
}

#[test]
fn test_transparent_canvas_round_trip() {
    let canvas = RgbaImage::new(37, 19);
    let png = create_png_auto(canvas.as_raw(), 37, 19).unwrap();
    assert_eq!(color_type(&png), 3);
    assert_eq!(decode(&png), canvas);
}

#[test]
fn test_sparse_canvas_uses_indexed() {
    let canvas = sparse_canvas(128, 96);
    let png = create_png_auto(canvas.as_raw(), 128, 96).unwrap();
    assert_eq!(color_type(&png), 3);
    assert_eq!(decode(&png), canvas);
}

#[test]
fn test_many_colors_uses_rgba() {
    let canvas = coordinate_tile(300, 20, 1);
    let png = create_png_auto(canvas.as_raw(), 300, 20).unwrap();
    assert_eq!(color_type(&png), 6);
    assert_eq!(decode(&png), canvas);
}

#[test]
fn test_explicit_rgba_round_trip() {
    let canvas = outline_tile(9, 7, color::BLUE);
    let png = create_png(canvas.as_raw(), 9, 7).unwrap();
    assert_eq!(color_type(&png), 6);
    assert_eq!(decode(&png), canvas);
}

#[test]
fn test_partial_alpha_preserved_in_indexed() {
    let canvas = RgbaImage::from_fn(4, 4, |x, _| image::Rgba([10, 20, 30, (x * 60) as u8]));
    let png = create_png_auto(canvas.as_raw(), 4, 4).unwrap();
    assert_eq!(decode(&png), canvas);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_output_is_deterministic() {
    // Large enough to take the parallel palette path
    let canvas = sparse_canvas(256, 256);
    let first = create_png_auto(canvas.as_raw(), 256, 256).unwrap();
    for _ in 0..4 {
        assert_eq!(create_png_auto(canvas.as_raw(), 256, 256).unwrap(), first);
    }
}

#[test]
fn test_indexed_smaller_for_sparse_canvas() {
    let canvas = sparse_canvas(512, 512);
    let indexed = create_png_auto(canvas.as_raw(), 512, 512).unwrap();
    let rgba = create_png(canvas.as_raw(), 512, 512).unwrap();
    assert!(indexed.len() < rgba.len());
}

// ============================================================================
// Sink tests
// ============================================================================

#[test]
fn test_write_png_to_vec() {
    let canvas = sparse_canvas(32, 32);
    let mut sink = Vec::new();
    let written = write_png(&mut sink, canvas.as_raw(), 32, 32).unwrap();
    assert_eq!(written, sink.len());
    assert_eq!(decode(&sink), canvas);
}

#[test]
fn test_write_png_propagates_sink_error() {
    let mut sink = FailingSink::with_capacity(8);
    let err = write_png(&mut sink, &[0, 0, 0, 0], 1, 1).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::WriteZero);
    assert_eq!(sink.written, PNG_SIGNATURE);
}

#[test]
fn test_wrong_buffer_length() {
    assert!(create_png_auto(&[0; 7], 1, 2).is_err());
}
