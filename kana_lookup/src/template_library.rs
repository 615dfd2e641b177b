use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use tracing::{info, warn};

use super::config::*;
use super::entities::*;
use super::error::*;
use super::glyph_renderer::*;
use super::normalizer::*;
use super::raster::*;

/// Canonical vectors for every known glyph, keyed by the glyph itself.
///
/// Built once per session and read-only afterwards. The library carries the
/// normalizer settings its templates were registered with; live ink must go
/// through the same settings to be comparable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TemplateLibrary {
    normalizer: NormalizerConfig,
    templates: BTreeMap<char, GlyphTemplate>,
}

impl TemplateLibrary {
    pub fn new(normalizer: NormalizerConfig) -> TemplateLibrary {
        TemplateLibrary {
            normalizer: normalizer,
            templates: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, template: GlyphTemplate) {
        assert_eq!(
            template.vector.len(),
            self.vector_len(),
            "Template vector length must match the library's."
        );
        self.templates.insert(template.glyph, template);
    }

    pub fn get(&self, glyph: char) -> Option<&GlyphTemplate> {
        self.templates.get(&glyph)
    }

    pub fn normalizer_config(&self) -> &NormalizerConfig {
        &self.normalizer
    }

    pub fn vector_len(&self) -> usize {
        let side = self.normalizer.target_size as usize;
        side * side
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GlyphTemplate> {
        self.templates.values()
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<TemplateLibrary> {
        let library: TemplateLibrary = bincode::deserialize_from(reader)?;
        library.normalizer.validate()?;
        for template in library.templates.values() {
            if template.vector.len() != library.vector_len() {
                return Err(RecognizerError::Config(format!(
                    "template for {:?} has {} cells, expected {}",
                    template.glyph,
                    template.vector.len(),
                    library.vector_len()
                )));
            }
        }
        Ok(library)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<TemplateLibrary> {
        TemplateLibrary::from_reader(std::io::BufReader::new(bytes))
    }
}

// Renders each glyph's printed form offscreen and registers it like live ink
pub struct TemplateBuilder {
    normalizer: Normalizer,
    config: TemplateConfig,
}

impl TemplateBuilder {
    pub fn new(normalizer: Normalizer, config: TemplateConfig) -> TemplateBuilder {
        TemplateBuilder {
            normalizer: normalizer,
            config: config,
        }
    }

    pub fn from_config(config: &RecognizerConfig) -> TemplateBuilder {
        TemplateBuilder::new(Normalizer::new(config.normalizer), config.templates)
    }

    pub fn build_template<R: GlyphRenderer + ?Sized>(&self, renderer: &R, symbol: &KanaSymbol) -> Result<GlyphTemplate> {
        let size = self.config.raster_size;
        let mut canvas = blank_pixmap(size, size)?;
        renderer.render(symbol.kana, &mut canvas, self.config.font_px)?;
        let vector = self.normalizer.normalize(&raster_from_pixmap(&canvas));
        if vector.is_blank() {
            warn!(glyph = %symbol.kana, "template rendered without ink");
        }
        Ok(GlyphTemplate {
            glyph: symbol.kana,
            script: symbol.script,
            vector: vector,
        })
    }

    /// Builds the whole library; any failure aborts the build so no partial
    /// library is ever handed out.
    pub fn build<R: GlyphRenderer + ?Sized>(&self, renderer: &R, pool: &[KanaSymbol]) -> Result<TemplateLibrary> {
        let mut library = TemplateLibrary::new(*self.normalizer.config());
        for symbol in pool {
            library.insert(self.build_template(renderer, symbol)?);
        }
        info!(templates = library.len(), cells = library.vector_len(), "template library built");
        Ok(library)
    }
}
