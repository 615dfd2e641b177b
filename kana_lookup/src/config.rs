use serde_derive::{Deserialize, Serialize};
use std::path::Path;

use super::error::*;

// Settings of the registration pipeline
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct NormalizerConfig {
    // Side of the square output frame; vectors have target_size² cells
    pub target_size: u32,
    // Padding kept free around the scaled ink
    pub margin: u32,
    // A pixel is ink only if its alpha exceeds this...
    pub alpha_threshold: u8,
    // ...and its mean RGB brightness is below this
    pub brightness_threshold: u8,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            target_size: 32,
            margin: 4,
            alpha_threshold: 15,
            brightness_threshold: 245,
        }
    }
}

impl NormalizerConfig {
    // The frame must leave room for at least one cell of ink
    pub fn validate(&self) -> Result<()> {
        if self.target_size == 0 {
            return Err(RecognizerError::Config("target_size must be positive".to_string()));
        }
        if self.margin >= self.target_size {
            return Err(RecognizerError::Config(format!(
                "margin {} leaves no room in a {}px frame",
                self.margin, self.target_size
            )));
        }
        Ok(())
    }
}

// Settings for rendering glyph templates offscreen
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TemplateConfig {
    // Side of the square offscreen raster
    pub raster_size: u32,
    // Point size of the printed glyph
    pub font_px: f32,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            raster_size: 96,
            font_px: 62.0,
        }
    }
}

// Brush used by the capture canvas
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BrushConfig {
    pub min_width: f32,
    // Brush width as a fraction of the canvas width
    pub width_ratio: f32,
    pub color: [u8; 3],
}

impl Default for BrushConfig {
    fn default() -> Self {
        BrushConfig {
            min_width: 8.0,
            width_ratio: 0.05,
            color: [0x11, 0x11, 0x11],
        }
    }
}

impl BrushConfig {
    pub fn width_for(&self, canvas_width: u32) -> f32 {
        f32::max(self.min_width, (canvas_width as f32 * self.width_ratio).round())
    }
}

/// Full recognizer configuration; every section falls back to its defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct RecognizerConfig {
    pub normalizer: NormalizerConfig,
    pub templates: TemplateConfig,
    pub brush: BrushConfig,
}

impl RecognizerConfig {
    pub fn from_json(json: &str) -> Result<RecognizerConfig> {
        let config: RecognizerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<RecognizerConfig> {
        let json = std::fs::read_to_string(path)?;
        RecognizerConfig::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.normalizer.validate()?;
        if !(self.templates.font_px > 0.0) {
            return Err(RecognizerError::Config("font_px must be positive".to_string()));
        }
        Ok(())
    }
}
