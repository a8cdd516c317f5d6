//! Tile manifest: the list of rendered cells making up one plot.
//!
//! YAML or JSON, chosen by file extension:
//!
//! ```yaml
//! tiles:
//!   - cell: "0,0,50,50"
//!     path: tiles/0_0.png
//!   - cell: { min_x: 50.0, min_y: 0.0, max_x: 100.0, max_y: 50.0 }
//!     path: tiles/1_0.png
//! ```
//!
//! Relative tile paths are resolved against the manifest's directory.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use plot_common::BoundingBox;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileManifest {
    #[serde(default)]
    pub tiles: Vec<TileEntry>,
}

/// One rendered cell on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileEntry {
    #[serde(deserialize_with = "deserialize_cell")]
    pub cell: BoundingBox,
    pub path: PathBuf,
}

/// Either "x1,y1,x2,y2" or a full rectangle object.
#[derive(Deserialize)]
#[serde(untagged)]
enum CellSpec {
    Text(String),
    Rect(BoundingBox),
}

fn deserialize_cell<'de, D>(deserializer: D) -> Result<BoundingBox, D::Error>
where
    D: Deserializer<'de>,
{
    match CellSpec::deserialize(deserializer)? {
        CellSpec::Text(s) => BoundingBox::from_plot_string(&s).map_err(serde::de::Error::custom),
        CellSpec::Rect(bbox) => Ok(bbox),
    }
}

impl TileManifest {
    /// Load a manifest and resolve relative tile paths.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;

        let mut manifest: TileManifest = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)
                .with_context(|| format!("Invalid JSON manifest {}", path.display()))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid YAML manifest {}", path.display()))?,
            other => bail!(
                "Unsupported manifest extension {:?} for {}; use .json, .yaml or .yml",
                other,
                path.display()
            ),
        };

        if let Some(base) = path.parent() {
            for entry in &mut manifest.tiles {
                if entry.path.is_relative() {
                    entry.path = base.join(&entry.path);
                }
            }
        }

        Ok(manifest)
    }

    /// Union of all tile cells, used as the MBR when none is configured.
    pub fn extent(&self) -> Option<BoundingBox> {
        let mut cells = self.tiles.iter().map(|t| t.cell);
        let first = cells.next()?;
        Some(cells.fold(first, |acc, cell| acc.union(&cell)))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
