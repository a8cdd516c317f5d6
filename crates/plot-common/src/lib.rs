//! Common types shared by the tile compositor crates and the plotter service.

pub mod bbox;
pub mod config;
pub mod error;

pub use bbox::{BboxParseError, BoundingBox};
pub use config::PlotConfig;
pub use error::{PlotError, PlotResult};
