// Fixtures shared by unit tests: a tiny glyph pool and a renderer drawing
// each glyph as a distinct block figure.

use tiny_skia::{Paint, Pixmap, Rect, Transform};

use super::entities::*;
use super::error::*;
use super::glyph_renderer::GlyphRenderer;
use super::ink_canvas::InkCanvas;

pub static SYMBOLS: [KanaSymbol; 5] = [
    KanaSymbol { kana: 'あ', romaji: "a", script: Script::Hiragana },
    KanaSymbol { kana: 'い', romaji: "i", script: Script::Hiragana },
    KanaSymbol { kana: 'う', romaji: "u", script: Script::Hiragana },
    KanaSymbol { kana: 'ア', romaji: "a", script: Script::Katakana },
    KanaSymbol { kana: 'イ', romaji: "i", script: Script::Katakana },
];

// Rectangles in a unit em square
fn figure(glyph: char) -> Option<Vec<(f32, f32, f32, f32)>> {
    let rects = match glyph {
        // T
        'あ' => vec![(0.0, 0.0, 1.0, 0.15), (0.425, 0.0, 0.575, 1.0)],
        // ||
        'い' => vec![(0.1, 0.0, 0.25, 1.0), (0.75, 0.0, 0.9, 1.0)],
        // hollow box
        'う' => vec![(0.0, 0.0, 1.0, 0.12), (0.0, 0.88, 1.0, 1.0), (0.0, 0.0, 0.12, 1.0), (0.88, 0.0, 1.0, 1.0)],
        // L
        'ア' => vec![(0.0, 0.0, 0.15, 1.0), (0.0, 0.85, 1.0, 1.0)],
        // =
        'イ' => vec![(0.0, 0.2, 1.0, 0.35), (0.0, 0.65, 1.0, 0.8)],
        _ => return None,
    };
    Some(rects)
}

pub struct BlockRenderer;

impl GlyphRenderer for BlockRenderer {
    fn render(&self, glyph: char, target: &mut Pixmap, font_px: f32) -> Result<()> {
        let rects = figure(glyph).ok_or(RecognizerError::MissingGlyph(glyph))?;
        let em = font_px;
        let ox = (target.width() as f32 - em) / 2.0;
        let oy = (target.height() as f32 - em) / 2.0;
        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        for (x0, y0, x1, y1) in rects {
            let rect = Rect::from_ltrb(ox + x0 * em, oy + y0 * em, ox + x1 * em, oy + y1 * em)
                .ok_or(RecognizerError::MissingGlyph(glyph))?;
            target.fill_rect(rect, &paint, Transform::identity(), None);
        }
        Ok(())
    }
}

// Hand-drawn approximations of the block figures on a 200x200 canvas
pub fn draw_glyph(canvas: &mut InkCanvas, glyph: char) {
    let strokes: Vec<[(f32, f32); 2]> = match glyph {
        'あ' => vec![[(40.0, 40.0), (160.0, 40.0)], [(100.0, 40.0), (100.0, 160.0)]],
        'い' => vec![[(50.0, 30.0), (50.0, 170.0)], [(150.0, 30.0), (150.0, 170.0)]],
        'ア' => vec![[(50.0, 40.0), (50.0, 160.0)], [(50.0, 160.0), (160.0, 160.0)]],
        'イ' => vec![[(40.0, 70.0), (160.0, 70.0)], [(40.0, 130.0), (160.0, 130.0)]],
        _ => vec![],
    };
    for stroke in strokes {
        canvas.pointer_down(stroke[0].0, stroke[0].1);
        canvas.pointer_move(stroke[1].0, stroke[1].1);
        canvas.pointer_up();
    }
}
