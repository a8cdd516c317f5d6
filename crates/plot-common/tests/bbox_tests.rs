//! Tests for BoundingBox parsing and rectangle operations.

use plot_common::bbox::{BboxParseError, BoundingBox};

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
}

#[test]
fn test_bbox_clone() {
    let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let bbox2 = bbox1;
    assert_eq!(bbox1, bbox2);
}

// ============================================================================
// from_plot_string tests
// ============================================================================

#[test]
fn test_parse_plot_bbox_integer() {
    let bbox = BoundingBox::from_plot_string("0,0,100,100").unwrap();
    assert_eq!(bbox.min_x, 0.0);
    assert_eq!(bbox.min_y, 0.0);
    assert_eq!(bbox.max_x, 100.0);
    assert_eq!(bbox.max_y, 100.0);
}

#[test]
fn test_parse_plot_bbox_floating() {
    let bbox = BoundingBox::from_plot_string("-125.5,24.75,-66.25,50.125").unwrap();
    assert!((bbox.min_x - (-125.5)).abs() < 0.001);
    assert!((bbox.min_y - 24.75).abs() < 0.001);
    assert!((bbox.max_x - (-66.25)).abs() < 0.001);
    assert!((bbox.max_y - 50.125).abs() < 0.001);
}

#[test]
fn test_parse_plot_bbox_scientific_notation() {
    let bbox = BoundingBox::from_plot_string("1e-6,2e-6,1e6,2e6").unwrap();
    assert!((bbox.min_x - 1e-6).abs() < 1e-10);
    assert!((bbox.max_x - 1e6).abs() < 0.001);
}

#[test]
fn test_parse_plot_bbox_negative() {
    let bbox = BoundingBox::from_plot_string("-180,-90,180,90").unwrap();
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
}

#[test]
fn test_parse_plot_bbox_web_mercator() {
    // EPSG:3857 coordinates (meters)
    let bbox =
        BoundingBox::from_plot_string("-20037508.34,-20037508.34,20037508.34,20037508.34").unwrap();
    assert!((bbox.min_x - (-20037508.34)).abs() < 0.01);
    assert!((bbox.max_x - 20037508.34).abs() < 0.01);
}

#[test]
fn test_parse_plot_bbox_invalid_format_too_few() {
    let result = BoundingBox::from_plot_string("0,0,100");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_plot_bbox_invalid_format_too_many() {
    let result = BoundingBox::from_plot_string("0,0,100,100,200");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_plot_bbox_invalid_number() {
    let result = BoundingBox::from_plot_string("abc,0,100,100");
    assert!(matches!(result, Err(BboxParseError::InvalidNumber(_))));
}

#[test]
fn test_parse_plot_bbox_empty_string() {
    let result = BoundingBox::from_plot_string("");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_plot_bbox_whitespace() {
    // Host tools often emit "x1, y1, x2, y2"; surrounding spaces are tolerated
    let bbox = BoundingBox::from_plot_string(" 0, 0, 100, 100 ").unwrap();
    assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_parse_plot_bbox_via_from_str() {
    let bbox: BoundingBox = "0,50,50,100".parse().unwrap();
    assert_eq!(bbox, BoundingBox::new(0.0, 50.0, 50.0, 100.0));
}

// ============================================================================
// Dimension tests (width/height)
// ============================================================================

#[test]
fn test_bbox_width() {
    let bbox = BoundingBox::new(10.0, 0.0, 30.0, 10.0);
    assert_eq!(bbox.width(), 20.0);
}

#[test]
fn test_bbox_height() {
    let bbox = BoundingBox::new(0.0, 5.0, 10.0, 25.0);
    assert_eq!(bbox.height(), 20.0);
}

#[test]
fn test_bbox_width_negative_coords() {
    let bbox = BoundingBox::new(-100.0, 0.0, -50.0, 10.0);
    assert_eq!(bbox.width(), 50.0);
}

#[test]
fn test_bbox_width_crossing_zero() {
    let bbox = BoundingBox::new(-10.0, 0.0, 10.0, 10.0);
    assert_eq!(bbox.width(), 20.0);
}

#[test]
fn test_bbox_zero_dimensions() {
    let bbox = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_bbox_very_small() {
    let bbox = BoundingBox::new(0.0, 0.0, 1e-10, 1e-10);
    assert!(bbox.width() > 0.0);
    assert!(bbox.height() > 0.0);
}

#[test]
fn test_bbox_very_large() {
    let bbox = BoundingBox::new(-1e10, -1e10, 1e10, 1e10);
    assert_eq!(bbox.width(), 2e10);
    assert_eq!(bbox.height(), 2e10);
}

#[test]
fn test_bbox_inverted_does_not_panic() {
    // Inverted bbox (min > max) - constructor doesn't validate
    let bbox = BoundingBox::new(10.0, 10.0, 0.0, 0.0);
    // Width/height will be negative
    assert_eq!(bbox.width(), -10.0);
    assert_eq!(bbox.height(), -10.0);
}

#[test]
fn test_bbox_inverted_is_degenerate() {
    assert!(BoundingBox::new(10.0, 10.0, 0.0, 0.0).is_degenerate());
}

#[test]
fn test_bbox_zero_width_is_degenerate() {
    assert!(BoundingBox::new(5.0, 0.0, 5.0, 10.0).is_degenerate());
    assert!(BoundingBox::new(0.0, 5.0, 10.0, 5.0).is_degenerate());
}

#[test]
fn test_bbox_very_small_is_not_degenerate() {
    assert!(!BoundingBox::new(0.0, 0.0, 1e-10, 1e-10).is_degenerate());
}

// ============================================================================
// Union tests
// ============================================================================

#[test]
fn test_bbox_union_disjoint() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(20.0, -5.0, 30.0, 5.0);
    assert_eq!(a.union(&b), BoundingBox::new(0.0, -5.0, 30.0, 10.0));
}

#[test]
fn test_bbox_union_contained() {
    let outer = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
    let inner = BoundingBox::new(25.0, 25.0, 75.0, 75.0);
    assert_eq!(outer.union(&inner), outer);
    assert_eq!(inner.union(&outer), outer);
}

#[test]
fn test_bbox_union_of_quadrants_is_whole() {
    let quadrants = [
        BoundingBox::new(0.0, 0.0, 50.0, 50.0),
        BoundingBox::new(50.0, 0.0, 100.0, 50.0),
        BoundingBox::new(0.0, 50.0, 50.0, 100.0),
        BoundingBox::new(50.0, 50.0, 100.0, 100.0),
    ];
    let whole = quadrants[1..]
        .iter()
        .fold(quadrants[0], |acc, q| acc.union(q));
    assert_eq!(whole, BoundingBox::new(0.0, 0.0, 100.0, 100.0));
}
