use crate::theme::Theme;
use serde::{Deserialize, Serialize};

/// Matplotlib-style points per inch; font sizes and stroke widths are given in points.
pub const POINTS_PER_INCH: f32 = 72.0;

pub const DEFAULT_OUTPUT_NAME: &str = "decision_tree_vertical.png";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Figure width in inches.
    pub width: f32,
    /// Figure height in inches.
    pub height: f32,
    pub dpi: f32,
    pub output_name: String,
    /// Fail the export when no font face can be found instead of rendering without text.
    pub strict_fonts: bool,
}

impl RenderConfig {
    pub fn pixel_width(&self) -> u32 {
        (self.width * self.dpi).round().max(0.0) as u32
    }

    pub fn pixel_height(&self) -> u32 {
        (self.height * self.dpi).round().max(0.0) as u32
    }

    /// Converts a length in points to output pixels.
    pub fn points_to_px(&self, points: f32) -> f32 {
        points * self.dpi / POINTS_PER_INCH
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 14.0,
            dpi: 250.0,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            strict_fonts: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub render: RenderConfig,
}
