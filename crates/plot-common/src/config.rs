//! Plot run configuration.
//!
//! A run is described by four options: the dataset MBR, the output image
//! size and the vertical flip flag. Values can come from a YAML file, from a
//! flat `plot.*` property map (as handed over by the job host) or from
//! `PLOT_*` environment variables; later sources override earlier ones.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;

use crate::bbox::BoundingBox;
use crate::error::{PlotError, PlotResult};

/// Property key for the dataset MBR ("x1,y1,x2,y2").
pub const FILE_MBR_KEY: &str = "plot.file_mbr";
/// Property key for the output image width.
pub const IMAGE_WIDTH_KEY: &str = "plot.image_width";
/// Property key for the output image height.
pub const IMAGE_HEIGHT_KEY: &str = "plot.image_height";
/// Property key for the vertical flip flag.
pub const VFLIP_KEY: &str = "plot.vflip";

pub const DEFAULT_IMAGE_WIDTH: i64 = 1000;
pub const DEFAULT_IMAGE_HEIGHT: i64 = 1000;

/// Configuration for one output artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Minimum bounding rectangle of the whole dataset
    #[serde(default)]
    pub file_mbr: Option<BoundingBox>,

    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub image_width: i64,

    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub image_height: i64,

    /// Flip vertically so that geographic +Y points up in the image
    #[serde(default)]
    pub vflip: bool,
}

fn default_width() -> i64 {
    DEFAULT_IMAGE_WIDTH
}

fn default_height() -> i64 {
    DEFAULT_IMAGE_HEIGHT
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            file_mbr: None,
            image_width: DEFAULT_IMAGE_WIDTH,
            image_height: DEFAULT_IMAGE_HEIGHT,
            vflip: false,
        }
    }
}

impl PlotConfig {
    /// Load configuration from a YAML file. Missing fields take defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> PlotResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PlotError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(contents: &str) -> PlotResult<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Build a configuration from a `plot.*` property map on top of defaults.
    pub fn from_properties(props: &HashMap<String, String>) -> PlotResult<Self> {
        let mut config = Self::default();
        config.apply_properties(props)?;
        Ok(config)
    }

    /// Override fields present in a `plot.*` property map.
    pub fn apply_properties(&mut self, props: &HashMap<String, String>) -> PlotResult<()> {
        if let Some(mbr) = props.get(FILE_MBR_KEY) {
            self.file_mbr = Some(BoundingBox::from_plot_string(mbr)?);
        }
        if let Some(width) = props.get(IMAGE_WIDTH_KEY) {
            self.image_width = parse_int(IMAGE_WIDTH_KEY, width)?;
        }
        if let Some(height) = props.get(IMAGE_HEIGHT_KEY) {
            self.image_height = parse_int(IMAGE_HEIGHT_KEY, height)?;
        }
        if let Some(vflip) = props.get(VFLIP_KEY) {
            self.vflip = parse_bool(VFLIP_KEY, vflip)?;
        }
        Ok(())
    }

    /// Override fields from `PLOT_FILE_MBR`, `PLOT_IMAGE_WIDTH`,
    /// `PLOT_IMAGE_HEIGHT` and `PLOT_VFLIP`.
    pub fn apply_env(&mut self) -> PlotResult<()> {
        let props: HashMap<String, String> = [
            ("PLOT_FILE_MBR", FILE_MBR_KEY),
            ("PLOT_IMAGE_WIDTH", IMAGE_WIDTH_KEY),
            ("PLOT_IMAGE_HEIGHT", IMAGE_HEIGHT_KEY),
            ("PLOT_VFLIP", VFLIP_KEY),
        ]
        .into_iter()
        .filter_map(|(var, key)| env::var(var).ok().map(|v| (key.to_string(), v)))
        .collect();
        self.apply_properties(&props)
    }

    /// Serialize back to the `plot.*` property map.
    pub fn to_properties(&self) -> HashMap<String, String> {
        let mut props = HashMap::new();
        if let Some(mbr) = &self.file_mbr {
            props.insert(FILE_MBR_KEY.to_string(), mbr.to_string());
        }
        props.insert(IMAGE_WIDTH_KEY.to_string(), self.image_width.to_string());
        props.insert(IMAGE_HEIGHT_KEY.to_string(), self.image_height.to_string());
        props.insert(VFLIP_KEY.to_string(), self.vflip.to_string());
        props
    }

    /// Check the configuration can open a compositor.
    ///
    /// Returns the validated MBR and the image size as unsigned pixels.
    pub fn validate(&self) -> PlotResult<(BoundingBox, u32, u32)> {
        let (width, height) = validate_dimensions(self.image_width, self.image_height)?;
        let mbr = self
            .file_mbr
            .ok_or_else(|| PlotError::InvalidConfig(format!("{} is not set", FILE_MBR_KEY)))?;
        if mbr.is_degenerate() {
            return Err(PlotError::InvalidConfig(format!(
                "degenerate MBR {}: width and height must be positive",
                mbr
            )));
        }
        Ok((mbr, width, height))
    }
}

/// Convert signed image dimensions into canvas pixels.
///
/// Both sizes must be positive, fit in `u32`, and the RGBA buffer they
/// describe must be addressable.
pub fn validate_dimensions(width: i64, height: i64) -> PlotResult<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 && rgba_len(w, h).is_some() => Ok((w, h)),
        _ => Err(PlotError::InvalidDimension { width, height }),
    }
}

fn rgba_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
}

fn parse_int(key: &str, value: &str) -> PlotResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| PlotError::InvalidConfig(format!("{} must be an integer, got '{}'", key, value)))
}

fn parse_bool(key: &str, value: &str) -> PlotResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(PlotError::InvalidConfig(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlotConfig::default();
        assert_eq!(config.image_width, 1000);
        assert_eq!(config.image_height, 1000);
        assert!(!config.vflip);
        assert!(config.file_mbr.is_none());
    }

    #[test]
    fn test_validate_dimensions() {
        assert_eq!(validate_dimensions(200, 100).unwrap(), (200, 100));
        assert!(matches!(
            validate_dimensions(0, 100),
            Err(PlotError::InvalidDimension { width: 0, height: 100 })
        ));
        assert!(matches!(
            validate_dimensions(10, -1),
            Err(PlotError::InvalidDimension { .. })
        ));
        assert!(validate_dimensions(i64::MAX, 1).is_err());
    }

    #[test]
    fn test_validate_dimensions_rejects_unaddressable_buffer() {
        let max = u32::MAX as i64;
        assert!(matches!(
            validate_dimensions(max, max),
            Err(PlotError::InvalidDimension { .. })
        ));
        assert!(validate_dimensions(max, 1).is_ok());
    }

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool(VFLIP_KEY, "TRUE").unwrap());
        assert!(parse_bool(VFLIP_KEY, " yes ").unwrap());
        assert!(!parse_bool(VFLIP_KEY, "0").unwrap());
        assert!(parse_bool(VFLIP_KEY, "maybe").is_err());
    }
}
