use image::{Rgba, RgbaImage};
use tiny_skia::{Color, Pixmap};

use super::error::*;

/// RGBA pixel grid, 8 bits per channel.
pub type RasterBuffer = RgbaImage;

pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A drawing surface the recognizer reads ink from.
///
/// The capture canvas implements it; so can any host-side backend that can
/// hand out its current pixels and wipe itself.
pub trait Surface {
    // Current raster at the surface's native resolution
    fn raster(&self) -> &RasterBuffer;
    // Reset to background
    fn clear(&mut self);
}

// Allocates a background-filled raster; zero-sized rasters cannot be drawn on
pub fn blank_raster(width: u32, height: u32) -> Result<RasterBuffer> {
    if width == 0 || height == 0 {
        return Err(RecognizerError::SurfaceUnavailable(format!(
            "cannot allocate a {}x{} raster",
            width, height
        )));
    }
    Ok(RgbaImage::from_pixel(width, height, BACKGROUND))
}

// Drawing canvas for glyph and stroke rendering, filled with background
pub fn blank_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        RecognizerError::SurfaceUnavailable(format!("cannot allocate a {}x{} canvas", width, height))
    })?;
    pixmap.fill(Color::WHITE);
    Ok(pixmap)
}

pub fn raster_from_pixmap(pixmap: &Pixmap) -> RasterBuffer {
    let mut raster = RgbaImage::new(pixmap.width(), pixmap.height());
    copy_window(pixmap, &mut raster, (0, 0), (pixmap.width(), pixmap.height()));
    raster
}

// Copies [x0, x1) x [y0, y1) from a canvas into an equally sized raster.
// Canvas pixels are premultiplied; raster pixels are not.
pub(crate) fn copy_window(pixmap: &Pixmap, raster: &mut RasterBuffer, from: (u32, u32), to: (u32, u32)) {
    let width = pixmap.width();
    let pixels = pixmap.pixels();
    for y in from.1..to.1 {
        for x in from.0..to.0 {
            let c = pixels[(y * width + x) as usize].demultiply();
            raster.put_pixel(x, y, Rgba([c.red(), c.green(), c.blue(), c.alpha()]));
        }
    }
}

// Wraps raw RGBA bytes, as handed over by a browser canvas
pub fn raster_from_rgba(pixels: Vec<u8>, width: u32, height: u32) -> Result<RasterBuffer> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(RecognizerError::SurfaceUnavailable(format!(
            "expected {} bytes for a {}x{} RGBA raster, got {}",
            expected,
            width,
            height,
            pixels.len()
        )));
    }
    RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
        RecognizerError::SurfaceUnavailable("raster buffer rejected".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_raster() {
        let raster = blank_raster(3, 2).unwrap();
        assert_eq!(raster.dimensions(), (3, 2));
        assert!(raster.pixels().all(|p| *p == BACKGROUND));
        assert!(matches!(blank_raster(0, 5), Err(RecognizerError::SurfaceUnavailable(_))));
    }

    #[test]
    fn test_pixmap_round_trip() {
        let mut pixmap = blank_pixmap(4, 3).unwrap();
        pixmap.pixels_mut()[5] = tiny_skia::ColorU8::from_rgba(200, 100, 50, 128).premultiply();
        let raster = raster_from_pixmap(&pixmap);
        assert_eq!(raster.dimensions(), (4, 3));
        assert_eq!(*raster.get_pixel(0, 0), BACKGROUND);
        // Straight alpha again, give or take rounding
        let px = raster.get_pixel(1, 1).0;
        assert_eq!(px[3], 128);
        assert!((px[0] as i32 - 200).abs() <= 2 && (px[2] as i32 - 50).abs() <= 2);
        assert!(matches!(blank_pixmap(0, 3), Err(RecognizerError::SurfaceUnavailable(_))));
    }

    #[test]
    fn test_raster_from_rgba() {
        let raster = raster_from_rgba(vec![0u8; 2 * 2 * 4], 2, 2).unwrap();
        assert_eq!(raster.get_pixel(1, 1).0, [0, 0, 0, 0]);
        assert!(raster_from_rgba(vec![0u8; 7], 2, 2).is_err());
    }
}
