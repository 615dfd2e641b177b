use serde_derive::{Deserialize, Serialize};
use std::fmt;

// The two kana scripts a glyph can belong to
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Hiragana,
    Katakana,
}

// Drill mode: a single script, or both mixed together
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Hiragana,
    Katakana,
    Mixed,
}

impl Mode {
    pub fn admits(self, script: Script) -> bool {
        match self {
            Mode::Mixed => true,
            Mode::Hiragana => script == Script::Hiragana,
            Mode::Katakana => script == Script::Katakana,
        }
    }

    pub fn parse(s: &str) -> Option<Mode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hiragana" => Some(Mode::Hiragana),
            "katakana" => Some(Mode::Katakana),
            "mixed" => Some(Mode::Mixed),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Hiragana => "hiragana",
            Mode::Katakana => "katakana",
            Mode::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

// One entry of the glyph pool; doubles as the prompt shown to the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KanaSymbol {
    // The glyph itself; also its identifier
    pub kana: char,
    // Expected romanized reading
    pub romaji: &'static str,
    pub script: Script,
}

pub type Prompt = KanaSymbol;

/// Fixed-length intensity grid produced by the normalizer.
///
/// Values are in `0.0..=1.0`, flattened row-major; 1.0 is full ink.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InkVector {
    values: Vec<f32>,
}

impl InkVector {
    pub(crate) fn from_values(values: Vec<f32>) -> InkVector {
        InkVector { values: values }
    }

    pub fn zeros(len: usize) -> InkVector {
        InkVector {
            values: vec![0f32; len],
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // True if no cell carries any ink
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|v| *v == 0f32)
    }
}

// A glyph's canonical vector, rendered from its printed form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GlyphTemplate {
    pub glyph: char,
    pub script: Script,
    pub vector: InkVector,
}
