use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::config::*;
use super::entities::*;
use super::raster::*;

// Axis-aligned box around all ink pixels, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl InkBounds {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

// Where the scaled crop lands inside the output frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub width: u32,
    pub height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

/// Registration pipeline turning an arbitrary raster into a fixed-size [`InkVector`].
///
/// Steps: find the ink's bounding box, crop to it, scale isotropically to fit
/// the frame minus a margin, center, then read back per-cell darkness.
/// The output is comparable across source resolutions and drawing positions.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Normalizer {
        Normalizer { config: config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    // Length of every vector this normalizer produces
    pub fn target_len(&self) -> usize {
        let side = self.config.target_size as usize;
        side * side
    }

    // Opaque enough and dark enough; tolerates anti-aliased stroke edges
    fn is_ink(&self, px: &Rgba<u8>) -> bool {
        let [r, g, b, a] = px.0;
        let brightness = (r as f32 + g as f32 + b as f32) / 3f32;
        a > self.config.alpha_threshold && brightness < self.config.brightness_threshold as f32
    }

    // None if the raster has no ink at all
    pub fn ink_bounds(&self, raster: &RasterBuffer) -> Option<InkBounds> {
        let mut res: Option<InkBounds> = None;
        for (x, y, px) in raster.enumerate_pixels() {
            if !self.is_ink(px) {
                continue;
            }
            res = Some(match res {
                None => InkBounds {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                },
                Some(b) => InkBounds {
                    min_x: u32::min(b.min_x, x),
                    min_y: u32::min(b.min_y, y),
                    max_x: u32::max(b.max_x, x),
                    max_y: u32::max(b.max_y, y),
                },
            });
        }
        res
    }

    // Isotropic fit of the crop into the frame, centered
    pub fn placement(&self, bounds: &InkBounds) -> Placement {
        let target = self.config.target_size;
        let room = (target - self.config.margin) as f32;
        let crop_w = bounds.width() as f32;
        let crop_h = bounds.height() as f32;
        let scale = f32::min(room / crop_w, room / crop_h);
        let width = f32::max(1f32, (crop_w * scale).round()) as u32;
        let height = f32::max(1f32, (crop_h * scale).round()) as u32;
        Placement {
            width: width,
            height: height,
            offset_x: (target - width) / 2,
            offset_y: (target - height) / 2,
        }
    }

    // The registered frame before intensity conversion
    pub fn register(&self, raster: &RasterBuffer) -> Option<RgbaImage> {
        let bounds = self.ink_bounds(raster)?;
        let placement = self.placement(&bounds);
        let target = self.config.target_size;

        let crop = imageops::crop_imm(raster, bounds.min_x, bounds.min_y, bounds.width(), bounds.height()).to_image();
        let scaled = imageops::resize(&crop, placement.width, placement.height, FilterType::Triangle);
        let mut frame = RgbaImage::from_pixel(target, target, BACKGROUND);
        // Blends over the white frame, so transparent source pixels read as background
        imageops::overlay(&mut frame, &scaled, placement.offset_x as i64, placement.offset_y as i64);
        Some(frame)
    }

    /// Normalizes a raster; a raster without ink yields the all-zero vector.
    pub fn normalize(&self, raster: &RasterBuffer) -> InkVector {
        let frame = match self.register(raster) {
            Some(frame) => frame,
            None => return InkVector::zeros(self.target_len()),
        };
        let mut values: Vec<f32> = Vec::with_capacity(self.target_len());
        // Row-major, alpha ignored
        for px in frame.pixels() {
            let brightness = (px.0[0] as f32 + px.0[1] as f32 + px.0[2] as f32) / 3f32;
            values.push(1f32 - brightness / 255f32);
        }
        InkVector::from_values(values)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new(NormalizerConfig::default())
    }
}
