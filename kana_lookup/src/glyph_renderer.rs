use skrifa::instance::Size;
use skrifa::outline::OutlinePen;
use skrifa::{FontRef, MetadataProvider};
use std::path::Path;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use super::error::*;

/// Draws a glyph's printed form, centered, onto an offscreen canvas.
pub trait GlyphRenderer {
    fn render(&self, glyph: char, target: &mut Pixmap, font_px: f32) -> Result<()>;
}

// Records outline commands, flipping font y-up to canvas y-down
struct PathPen {
    builder: PathBuilder,
}

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, -y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, -y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.builder.quad_to(cx0, -cy0, x, -y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.builder.cubic_to(cx0, -cy0, cx1, -cy1, x, -y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Renders glyphs from TrueType/OpenType font data using their unhinted outlines.
pub struct FontGlyphRenderer {
    font_data: Vec<u8>,
    index: u32,
}

impl FontGlyphRenderer {
    pub fn new(font_data: Vec<u8>, index: u32) -> Result<FontGlyphRenderer> {
        FontRef::from_index(&font_data, index).map_err(|e| RecognizerError::Font(e.to_string()))?;
        Ok(FontGlyphRenderer {
            font_data: font_data,
            index: index,
        })
    }

    pub fn load(path: &Path, index: u32) -> Result<FontGlyphRenderer> {
        let data = std::fs::read(path)?;
        FontGlyphRenderer::new(data, index)
    }

    fn font(&self) -> Result<FontRef<'_>> {
        FontRef::from_index(&self.font_data, self.index).map_err(|e| RecognizerError::Font(e.to_string()))
    }

    pub fn has_glyph(&self, glyph: char) -> bool {
        match self.font() {
            Ok(font) => font.charmap().map(glyph).is_some(),
            Err(_) => false,
        }
    }

    // Glyph outline at the given pixel size, baseline at y = 0, y growing down
    pub fn glyph_path(&self, glyph: char, font_px: f32) -> Result<tiny_skia::Path> {
        let font = self.font()?;
        let glyph_id = font.charmap().map(glyph).ok_or(RecognizerError::MissingGlyph(glyph))?;
        let outlines = font.outline_glyphs();
        let outline = outlines.get(glyph_id).ok_or(RecognizerError::MissingGlyph(glyph))?;
        let mut pen = PathPen {
            builder: PathBuilder::new(),
        };
        outline
            .draw(Size::new(font_px), &mut pen)
            .map_err(|e| RecognizerError::Font(format!("cannot draw {:?}: {:?}", glyph, e)))?;
        // Blank glyphs have no path at all
        pen.builder.finish().ok_or(RecognizerError::MissingGlyph(glyph))
    }
}

impl GlyphRenderer for FontGlyphRenderer {
    fn render(&self, glyph: char, target: &mut Pixmap, font_px: f32) -> Result<()> {
        let path = self.glyph_path(glyph, font_px)?;
        let bounds = path.bounds();
        let dx = target.width() as f32 / 2.0 - (bounds.left() + bounds.width() / 2.0);
        let dy = target.height() as f32 / 2.0 - (bounds.top() + bounds.height() / 2.0);
        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        paint.anti_alias = true;
        target.fill_path(&path, &paint, FillRule::Winding, Transform::from_translate(dx, dy), None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::config::RecognizerConfig;
    use super::super::entities::Mode;
    use super::super::matcher::Matcher;
    use super::super::normalizer::Normalizer;
    use super::super::raster::*;
    use super::super::template_library::TemplateBuilder;
    use super::super::test_support::*;
    use super::*;

    // Block-figure kana: あ T, い ||, う box, ア L, イ =; 600 units square on a 1000 em
    static KANA_BLOCKS: &[u8] = include_bytes!("../tests/data/kana-blocks.ttf");

    fn blocks() -> FontGlyphRenderer {
        FontGlyphRenderer::new(KANA_BLOCKS.to_vec(), 0).unwrap()
    }

    fn dark_in_row(raster: &RasterBuffer, y: u32) -> usize {
        (0..raster.width()).filter(|x| raster.get_pixel(*x, y).0[0] < 128).count()
    }

    #[test]
    fn test_rejects_non_font_data() {
        let res = FontGlyphRenderer::new(vec![0u8, 1, 2, 3, 4, 5], 0);
        assert!(matches!(res, Err(RecognizerError::Font(_))));
    }

    #[test]
    fn test_missing_font_file() {
        let res = FontGlyphRenderer::load(Path::new("/nonexistent/kana.ttf"), 0);
        assert!(matches!(res, Err(RecognizerError::Io(_))));
    }

    #[test]
    fn test_pen_flips_y() {
        let mut pen = PathPen {
            builder: PathBuilder::new(),
        };
        pen.move_to(0.0, 0.0);
        pen.line_to(10.0, 20.0);
        pen.line_to(14.0, 22.0);
        pen.close();
        let bounds = pen.builder.finish().unwrap().bounds();
        assert_eq!(bounds.top(), -22.0);
        assert_eq!(bounds.bottom(), 0.0);
    }

    #[test]
    fn test_charmap_coverage() {
        let font = blocks();
        for glyph in ['あ', 'い', 'う', 'ア', 'イ'] {
            assert!(font.has_glyph(glyph));
        }
        assert!(!font.has_glyph('A'));
        assert!(matches!(font.glyph_path('A', 62.0), Err(RecognizerError::MissingGlyph('A'))));
    }

    #[test]
    fn test_glyph_path_scales_outline() {
        // ア spans x 100..700 and y 50..650 in font units
        let bounds = blocks().glyph_path('ア', 100.0).unwrap().bounds();
        assert!((bounds.left() - 10.0).abs() < 0.01);
        assert!((bounds.right() - 70.0).abs() < 0.01);
        assert!((bounds.top() + 65.0).abs() < 0.01);
        assert!((bounds.bottom() + 5.0).abs() < 0.01);
    }

    #[test]
    fn test_render_is_centered_and_upright() {
        let mut canvas = blank_pixmap(96, 96).unwrap();
        blocks().render('ア', &mut canvas, 62.0).unwrap();
        let raster = raster_from_pixmap(&canvas);
        let bounds = Normalizer::default().ink_bounds(&raster).unwrap();
        // 37.2px figure around the canvas centre
        let cx = (bounds.min_x + bounds.max_x) as f32 / 2.0;
        let cy = (bounds.min_y + bounds.max_y) as f32 / 2.0;
        assert!((cx - 47.5).abs() <= 1.0, "centre x {}", cx);
        assert!((cy - 47.5).abs() <= 1.0, "centre y {}", cy);
        assert!((36..=40).contains(&bounds.width()));
        // The L's foot is at the bottom, its stem on the left
        let top = dark_in_row(&raster, bounds.min_y + 2);
        let bottom = dark_in_row(&raster, bounds.max_y - 2);
        assert!(bottom > 30 && top < 10, "top {} bottom {}", top, bottom);
        assert!(raster.get_pixel(bounds.min_x + 2, bounds.min_y + 2).0[0] < 128);
        assert!(raster.get_pixel(bounds.max_x - 2, bounds.min_y + 2).0[0] > 128);
    }

    #[test]
    fn test_font_templates_recognize_themselves() {
        let config = RecognizerConfig::default();
        let library = TemplateBuilder::from_config(&config).build(&blocks(), &SYMBOLS).unwrap();
        let matcher = Matcher::new(library);
        for symbol in SYMBOLS.iter() {
            let template = matcher.library().get(symbol.kana).unwrap();
            let best = matcher.classify(&template.vector, &SYMBOLS, Mode::Mixed).unwrap();
            assert_eq!(best.glyph, symbol.kana);
            assert!((best.score - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_font_templates_agree_with_block_figures() {
        let builder = TemplateBuilder::from_config(&RecognizerConfig::default());
        let from_font = builder.build(&blocks(), &SYMBOLS).unwrap();
        let from_blocks = builder.build(&BlockRenderer, &SYMBOLS).unwrap();
        for symbol in SYMBOLS.iter() {
            let a = &from_font.get(symbol.kana).unwrap().vector;
            let b = &from_blocks.get(symbol.kana).unwrap().vector;
            let sim = super::super::similarity::cosine_similarity(a, b);
            assert!(sim > 0.95, "{} agreed only {}", symbol.kana, sim);
        }
    }
}
