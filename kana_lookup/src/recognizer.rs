use tracing::{error, info};

use super::config::*;
use super::entities::*;
use super::error::*;
use super::glyph_renderer::*;
use super::matcher::*;
use super::normalizer::*;
use super::raster::*;
use super::template_library::*;
use super::*;

pub const INIT_FAILURE_MESSAGE: &str = "Failed to initialize local recognizer.";

/// Normalizer plus template matcher, with an explicit readiness state.
///
/// A recognizer whose template library could not be built stays unready and
/// refuses to classify; it never falls back to guessing.
pub struct Recognizer {
    normalizer: Normalizer,
    matcher: Option<Matcher>,
    failure: Option<String>,
}

impl Recognizer {
    pub fn initialize<R: GlyphRenderer + ?Sized>(config: &RecognizerConfig, renderer: &R, pool: &[KanaSymbol]) -> Recognizer {
        let built = config
            .validate()
            .and_then(|_| TemplateBuilder::from_config(config).build(renderer, pool));
        match built {
            Ok(library) => Recognizer {
                normalizer: Normalizer::new(*library.normalizer_config()),
                matcher: Some(Matcher::new(library)),
                failure: None,
            },
            Err(e) => {
                error!(error = %e, "recognizer initialization failed");
                Recognizer::unavailable(config, e.to_string())
            }
        }
    }

    // From a prebuilt library, e.g. one baked ahead of time. Live ink is
    // registered with the settings the library was built with.
    pub fn from_library(library: TemplateLibrary) -> Result<Recognizer> {
        let settings = *library.normalizer_config();
        settings.validate()?;
        let normalizer = Normalizer::new(settings);
        if library.iter().any(|t| t.vector.len() != normalizer.target_len()) {
            return Err(RecognizerError::Config(format!(
                "library vectors do not have the {} cells its settings produce",
                normalizer.target_len()
            )));
        }
        info!(templates = library.len(), target_size = settings.target_size, "recognizer loaded from library");
        Ok(Recognizer {
            normalizer: normalizer,
            matcher: Some(Matcher::new(library)),
            failure: None,
        })
    }

    pub fn unavailable(config: &RecognizerConfig, reason: String) -> Recognizer {
        Recognizer {
            normalizer: Normalizer::new(config.normalizer),
            matcher: None,
            failure: Some(reason),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.matcher.is_some()
    }

    // User-facing explanation when the drawing exercise has to be disabled
    pub fn status_message(&self) -> Option<&'static str> {
        match self.matcher {
            Some(_) => None,
            None => Some(INIT_FAILURE_MESSAGE),
        }
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    fn matcher(&self) -> Result<&Matcher> {
        self.matcher.as_ref().ok_or_else(|| {
            RecognizerError::NotReady(self.failure.clone().unwrap_or_else(|| INIT_FAILURE_MESSAGE.to_string()))
        })
    }

    pub fn classify(&self, vector: &InkVector, pool: &[KanaSymbol], mode: Mode) -> Result<Option<Match>> {
        Ok(self.matcher()?.classify(vector, pool, mode))
    }

    pub fn classify_raster(&self, raster: &RasterBuffer, pool: &[KanaSymbol], mode: Mode) -> Result<Option<Match>> {
        let matcher = self.matcher()?;
        Ok(matcher.classify(&self.normalizer.normalize(raster), pool, mode))
    }

    pub fn lookup(&self, raster: &RasterBuffer, pool: &[KanaSymbol], mode: Mode, limit: usize) -> Result<Vec<Match>> {
        let matcher = self.matcher()?;
        Ok(matcher.top_matches(&self.normalizer.normalize(raster), pool, mode, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::super::ink_canvas::InkCanvas;
    use super::super::similarity::cosine_similarity;
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_ready_recognizer_reads_ink() {
        let recognizer = Recognizer::initialize(&RecognizerConfig::default(), &BlockRenderer, &SYMBOLS);
        assert!(recognizer.is_ready());
        assert!(recognizer.status_message().is_none());
        for glyph in ['あ', 'い', 'ア', 'イ'] {
            let mut canvas = InkCanvas::new(200, 200).unwrap();
            draw_glyph(&mut canvas, glyph);
            let best = recognizer.classify_raster(canvas.raster(), &SYMBOLS, Mode::Mixed).unwrap().unwrap();
            assert_eq!(best.glyph, glyph);
        }
    }

    #[test]
    fn test_failed_build_is_not_ready() {
        let mut pool = SYMBOLS.to_vec();
        pool.push(KanaSymbol { kana: 'お', romaji: "o", script: Script::Hiragana });
        let recognizer = Recognizer::initialize(&RecognizerConfig::default(), &BlockRenderer, &pool);
        assert!(!recognizer.is_ready());
        assert_eq!(recognizer.status_message(), Some(INIT_FAILURE_MESSAGE));
        assert!(recognizer.failure().unwrap().contains("お"));
        let blank = blank_raster(10, 10).unwrap();
        let res = recognizer.classify_raster(&blank, &pool, Mode::Mixed);
        assert!(matches!(res, Err(RecognizerError::NotReady(_))));
        assert!(recognizer.lookup(&blank, &pool, Mode::Mixed, 3).is_err());
    }

    #[test]
    fn test_from_library_checks_settings() {
        let bad = NormalizerConfig {
            target_size: 4,
            margin: 6,
            ..NormalizerConfig::default()
        };
        let res = Recognizer::from_library(TemplateLibrary::new(bad));
        assert!(matches!(res, Err(RecognizerError::Config(_))));
        let library = TemplateBuilder::from_config(&RecognizerConfig::default())
            .build(&BlockRenderer, &SYMBOLS)
            .unwrap();
        let recognizer = Recognizer::from_library(library).unwrap();
        assert!(recognizer.is_ready());
    }

    #[test]
    fn test_baked_settings_drive_live_registration() {
        let config = RecognizerConfig::from_json(r#"{"normalizer":{"margin":16,"alpha_threshold":200}}"#).unwrap();
        let library = TemplateBuilder::from_config(&config).build(&BlockRenderer, &SYMBOLS).unwrap();
        let mut bytes: Vec<u8> = Vec::new();
        library.to_writer(&mut bytes).unwrap();
        let recognizer = Recognizer::from_library(TemplateLibrary::from_bytes(&bytes).unwrap()).unwrap();
        assert_eq!(recognizer.normalizer().config(), &config.normalizer);

        let mut canvas = InkCanvas::new(200, 200).unwrap();
        draw_glyph(&mut canvas, 'あ');
        let template = library.get('あ').unwrap();
        let live = recognizer.normalizer().normalize(canvas.raster());
        let default_space = Normalizer::default().normalize(canvas.raster());
        let matched = cosine_similarity(&live, &template.vector);
        assert!(matched > cosine_similarity(&default_space, &template.vector) + 0.1);
        let best = recognizer.classify_raster(canvas.raster(), &SYMBOLS, Mode::Mixed).unwrap().unwrap();
        assert_eq!(best.glyph, 'あ');
    }

    #[test]
    fn test_invalid_config_is_not_ready() {
        let mut config = RecognizerConfig::default();
        config.normalizer.margin = config.normalizer.target_size;
        let recognizer = Recognizer::initialize(&config, &BlockRenderer, &SYMBOLS);
        assert!(!recognizer.is_ready());
        assert!(recognizer.failure().unwrap().contains("margin"));
        let blank = blank_raster(10, 10).unwrap();
        assert!(matches!(recognizer.classify_raster(&blank, &SYMBOLS, Mode::Mixed), Err(RecognizerError::NotReady(_))));
    }
}
