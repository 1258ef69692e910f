//! Chart style configuration
//!
//! Defaults match the original coverage chart; an optional YAML file can
//! override geometry, palette, and the highlighted coverage threshold.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Margins reserved around the plot area, in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Margins {
    #[serde(default = "default_top")]
    pub top: u32,
    #[serde(default = "default_left")]
    pub left: u32,
    #[serde(default = "default_right")]
    pub right: u32,
    #[serde(default)]
    pub bottom: u32,
}

fn default_top() -> u32 {
    110
}

fn default_left() -> u32 {
    190
}

fn default_right() -> u32 {
    10
}

impl Default for Margins {
    fn default() -> Self {
        Margins {
            top: default_top(),
            left: default_left(),
            right: default_right(),
            bottom: 0,
        }
    }
}

/// Chart style settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Plot area width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Height of one model row in pixels
    #[serde(default = "default_row_height")]
    pub row_height: u32,

    /// Margins around the plot area
    #[serde(default)]
    pub margins: Margins,

    /// Depth-band colors, reused by index if there are more bands
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Coverage percentage whose grid rule is highlighted
    #[serde(default = "default_highlight_pct")]
    pub highlight_pct: u32,
}

fn default_width() -> u32 {
    225
}

fn default_row_height() -> u32 {
    16
}

fn default_palette() -> Vec<String> {
    ["#339900", "#66cc00", "#009999", "#33cccc", "#669999"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_highlight_pct() -> u32 {
    80
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            width: default_width(),
            row_height: default_row_height(),
            margins: Margins::default(),
            palette: default_palette(),
            highlight_pct: default_highlight_pct(),
        }
    }
}

impl ChartStyle {
    /// Load style overrides from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read style file: {}", path.display()))?;
        let style: ChartStyle = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML style: {}", path.display()))?;
        style.validate()?;
        Ok(style)
    }

    /// Validate style settings
    pub fn validate(&self) -> Result<()> {
        // The x-scale maps 0-100% onto width-10 pixels, so anything
        // narrower leaves no room for bars.
        if self.width <= 10 {
            anyhow::bail!("Chart width must be greater than 10 pixels");
        }
        if self.row_height == 0 {
            anyhow::bail!("Row height must be at least 1 pixel");
        }
        if self.palette.is_empty() {
            anyhow::bail!("Palette must contain at least one color");
        }
        if self.highlight_pct > 100 {
            anyhow::bail!("Highlight percentage must be 0-100");
        }
        Ok(())
    }

    /// Color for a depth-band index, cycling through the palette
    pub fn color_for(&self, band_index: usize) -> &str {
        &self.palette[band_index % self.palette.len()]
    }
}
