//! Shared test utilities for the tile compositor workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Tile and canvas generators
//! - Byte sinks that fail on demand
//! - Common rectangle fixtures
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, solid_tile, FailingSink};
//! ```

pub mod fixtures;
pub mod generators;
pub mod sinks;

pub use fixtures::*;
pub use generators::*;
pub use sinks::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of pixel positions (±`tolerance` px).
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_pixel_near;
///
/// assert_pixel_near!((199, 200), (200, 200), 1);
/// ```
#[macro_export]
macro_rules! assert_pixel_near {
    (($x1:expr, $y1:expr), ($x2:expr, $y2:expr), $tolerance:expr) => {{
        $crate::assert_approx_eq!($x1, $x2, $tolerance);
        $crate::assert_approx_eq!($y1, $y2, $tolerance);
    }};
}
