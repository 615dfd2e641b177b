//! On-device kana handwriting recognition.
//!
//! Ink is registered into a fixed-size intensity grid (crop, isotropic scale,
//! center) and matched against templates rendered from each glyph's printed
//! form, using cosine similarity. A session controller runs the drawing
//! drill on top: prompt selection, grading and a FIFO retry queue.

extern crate bincode;
extern crate serde_derive;
extern crate wasm_bindgen;

mod config;
mod entities;
mod error;
mod glyph_renderer;
mod ink_canvas;
mod kana_data;
mod match_collector;
mod matcher;
mod normalizer;
mod raster;
mod recognizer;
mod session;
mod similarity;
mod stats;
mod template_library;
#[cfg(test)]
mod test_support;

use serde_derive::{Deserialize, Serialize};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub use config::{BrushConfig, NormalizerConfig, RecognizerConfig, TemplateConfig};
pub use entities::{GlyphTemplate, InkVector, KanaSymbol, Mode, Prompt, Script};
pub use error::{RecognizerError, Result};
pub use glyph_renderer::{FontGlyphRenderer, GlyphRenderer};
pub use ink_canvas::{device_resolution, InkCanvas};
pub use kana_data::{filter_pool, find_symbol, KANA_SYMBOLS};
pub use match_collector::MatchCollector;
pub use matcher::Matcher;
pub use normalizer::{InkBounds, Normalizer, Placement};
pub use raster::{blank_pixmap, blank_raster, raster_from_pixmap, raster_from_rgba, RasterBuffer, Surface, BACKGROUND};
pub use recognizer::{Recognizer, INIT_FAILURE_MESSAGE};
pub use session::{GradeReport, Phase, SessionController, SessionState, Submission, NO_INK_FEEDBACK};
pub use similarity::{cosine, cosine_similarity};
pub use stats::{JsonStatsStore, KanaLifetimeStats, StatsSink};
pub use template_library::{TemplateBuilder, TemplateLibrary};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub glyph: char,
    pub score: f32,
}

thread_local!(static RECOGNIZER: RefCell<Option<Recognizer>> = RefCell::new(None));

// Installs a baked template library for the typed and wasm lookups
pub fn install_library(library: TemplateLibrary) -> Result<usize> {
    let count = library.len();
    let recognizer = Recognizer::from_library(library)?;
    RECOGNIZER.with(|cell| *cell.borrow_mut() = Some(recognizer));
    Ok(count)
}

pub fn lookup_typed(raster: &RasterBuffer, mode: Mode, limit: usize) -> Result<Vec<Match>> {
    RECOGNIZER.with(|cell| match cell.borrow().as_ref() {
        Some(recognizer) => recognizer.lookup(raster, &KANA_SYMBOLS, mode, limit),
        None => Err(RecognizerError::NotReady("no template library installed".to_string())),
    })
}

#[wasm_bindgen]
pub fn load_library(bytes: &[u8]) -> std::result::Result<u32, JsValue> {
    let library = TemplateLibrary::from_bytes(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let count = install_library(library).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(count as u32)
}

// Input is the RGBA data of a canvas, as in ImageData; output is a JSON array of matches
#[wasm_bindgen]
pub fn lookup(pixels: Vec<u8>, width: u32, height: u32, mode: &str, limit: usize) -> std::result::Result<String, JsValue> {
    let mode = Mode::parse(mode).ok_or_else(|| JsValue::from_str(&format!("unknown mode {:?}", mode)))?;
    let raster = raster_from_rgba(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let matches = lookup_typed(&raster, mode, limit.max(1)).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&matches).map_err(|e| JsValue::from_str(&e.to_string()))
}
