use tiny_skia::{Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

use super::config::*;
use super::raster::*;
use super::*;

/// Capture surface accumulating freehand ink at device resolution.
pub struct InkCanvas {
    pixmap: Pixmap,
    // Straight-alpha copy of the canvas, kept in step after every segment
    raster: RasterBuffer,
    brush: BrushConfig,
    // Overrides the brush's width-derived size when set
    fixed_width: Option<f32>,
    // Last point of the stroke in progress; None between strokes
    last: Option<Point>,
    has_ink: bool,
}

// Backing-store size for a canvas laid out at css size with the given pixel ratio
pub fn device_resolution(css_width: f32, css_height: f32, device_pixel_ratio: f32) -> (u32, u32) {
    let dpr = if device_pixel_ratio > 0.0 { device_pixel_ratio } else { 1.0 };
    let width = f32::max(1.0, (css_width * dpr).round());
    let height = f32::max(1.0, (css_height * dpr).round());
    (width as u32, height as u32)
}

impl InkCanvas {
    pub fn new(width: u32, height: u32) -> Result<InkCanvas> {
        InkCanvas::with_brush(width, height, BrushConfig::default())
    }

    pub fn with_brush(width: u32, height: u32, brush: BrushConfig) -> Result<InkCanvas> {
        let pixmap = blank_pixmap(width, height)?;
        Ok(InkCanvas {
            raster: raster_from_pixmap(&pixmap),
            pixmap: pixmap,
            brush: brush,
            fixed_width: None,
            last: None,
            has_ink: false,
        })
    }

    pub fn with_brush_width(mut self, width: f32) -> InkCanvas {
        self.fixed_width = Some(width);
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn brush_width(&self) -> f32 {
        match self.fixed_width {
            Some(width) => width,
            None => self.brush.width_for(self.pixmap.width()),
        }
    }

    pub fn has_ink(&self) -> bool {
        self.has_ink
    }

    // Resync to a new backing-store size; always wipes the ink
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if (self.pixmap.width(), self.pixmap.height()) != (width, height) {
            self.pixmap = blank_pixmap(width, height)?;
            self.raster = raster_from_pixmap(&self.pixmap);
        }
        self.clear();
        Ok(())
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.last = Some(Point { x: x, y: y });
        self.has_ink = true;
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let from = match self.last {
            Some(pt) => pt,
            None => return,
        };
        let to = Point { x: x, y: y };
        self.draw_segment(from, to);
        self.last = Some(to);
    }

    pub fn pointer_up(&mut self) {
        self.last = None;
    }

    // Replays one recorded stroke
    pub fn draw_stroke(&mut self, stroke: &Stroke) {
        let mut points = stroke.points.iter();
        let first = match points.next() {
            Some(pt) => *pt,
            None => return,
        };
        self.pointer_down(first.x, first.y);
        for pt in points {
            self.pointer_move(pt.x, pt.y);
        }
        self.pointer_up();
    }

    // Round-capped, anti-aliased segment in the brush colour
    fn draw_segment(&mut self, a: Point, b: Point) {
        let mut pb = PathBuilder::new();
        pb.move_to(a.x, a.y);
        pb.line_to(b.x, b.y);
        let path = match pb.finish() {
            Some(path) => path,
            None => return,
        };
        let width = self.brush_width();
        let [r, g, bl] = self.brush.color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, bl, 255);
        paint.anti_alias = true;
        let pen = tiny_skia::Stroke {
            width: width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..tiny_skia::Stroke::default()
        };
        self.pixmap.stroke_path(&path, &paint, &pen, Transform::identity(), None);

        // Only the segment's neighbourhood can have changed
        let reach = width / 2.0 + 2.0;
        let (w, h) = (self.pixmap.width() as f32, self.pixmap.height() as f32);
        let from = (
            (f32::min(a.x, b.x) - reach).floor().clamp(0.0, w) as u32,
            (f32::min(a.y, b.y) - reach).floor().clamp(0.0, h) as u32,
        );
        let to = (
            (f32::max(a.x, b.x) + reach).ceil().clamp(0.0, w) as u32,
            (f32::max(a.y, b.y) + reach).ceil().clamp(0.0, h) as u32,
        );
        copy_window(&self.pixmap, &mut self.raster, from, to);
    }
}

impl Surface for InkCanvas {
    fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::WHITE);
        for px in self.raster.pixels_mut() {
            *px = BACKGROUND;
        }
        self.last = None;
        self.has_ink = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_pixels(canvas: &InkCanvas) -> usize {
        canvas.raster().pixels().filter(|p| p.0[0] < 128).count()
    }

    #[test]
    fn test_device_resolution() {
        assert_eq!(device_resolution(300.0, 200.0, 2.0), (600, 400));
        assert_eq!(device_resolution(0.2, 0.2, 1.0), (1, 1));
        assert_eq!(device_resolution(100.0, 50.0, 0.0), (100, 50));
    }

    #[test]
    fn test_stroke_lays_ink() {
        let mut canvas = InkCanvas::new(100, 100).unwrap();
        assert_eq!(canvas.brush_width(), 8.0);
        canvas.pointer_down(20.0, 50.0);
        assert!(canvas.has_ink());
        canvas.pointer_move(80.0, 50.0);
        canvas.pointer_up();
        let core = canvas.raster().get_pixel(50, 50).0;
        assert!(core[0] <= 0x13 && core[3] == 255, "core pixel was {:?}", core);
        assert_eq!(canvas.raster().get_pixel(50, 10).0, [255, 255, 255, 255]);
        // Round caps reach past the endpoints by half the brush
        assert!(canvas.raster().get_pixel(17, 50).0[0] < 128);
        assert!(canvas.raster().get_pixel(10, 50).0[0] == 255);
    }

    #[test]
    fn test_moves_without_down_are_ignored() {
        let mut canvas = InkCanvas::new(64, 64).unwrap();
        canvas.pointer_move(10.0, 10.0);
        canvas.pointer_move(50.0, 50.0);
        assert_eq!(dark_pixels(&canvas), 0);
        assert!(!canvas.has_ink());
    }

    #[test]
    fn test_clear_and_resize() {
        let mut canvas = InkCanvas::new(64, 64).unwrap();
        canvas.draw_stroke(&Stroke {
            points: vec![Point { x: 5.0, y: 5.0 }, Point { x: 60.0, y: 60.0 }],
        });
        assert!(dark_pixels(&canvas) > 0);
        canvas.clear();
        assert_eq!(dark_pixels(&canvas), 0);
        assert!(!canvas.has_ink());

        canvas.draw_stroke(&Stroke {
            points: vec![Point { x: 5.0, y: 5.0 }, Point { x: 60.0, y: 5.0 }],
        });
        canvas.resize(200, 120).unwrap();
        assert_eq!(canvas.raster().dimensions(), (200, 120));
        assert_eq!(canvas.brush_width(), 10.0);
        assert_eq!(dark_pixels(&canvas), 0);
        assert!(canvas.resize(0, 10).is_err());
    }

    #[test]
    fn test_strokes_clip_to_canvas() {
        let mut canvas = InkCanvas::new(32, 32).unwrap().with_brush_width(4.0);
        canvas.pointer_down(-20.0, 16.0);
        canvas.pointer_move(60.0, 16.0);
        assert!(canvas.raster().get_pixel(0, 16).0[0] < 0x20);
        assert!(canvas.raster().get_pixel(31, 16).0[0] < 0x20);
        canvas.pointer_down(-50.0, -50.0);
        canvas.pointer_move(-40.0, -40.0);
        assert_eq!(canvas.raster().get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_mirror_matches_canvas() {
        let mut canvas = InkCanvas::new(120, 80).unwrap();
        canvas.draw_stroke(&Stroke {
            points: vec![Point { x: 10.0, y: 70.0 }, Point { x: 60.0, y: 10.0 }, Point { x: 110.0, y: 70.0 }],
        });
        assert_eq!(canvas.raster(), &raster_from_pixmap(&canvas.pixmap));
    }
}
