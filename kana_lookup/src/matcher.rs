use tracing::debug;

use super::entities::*;
use super::match_collector::*;
use super::similarity::*;
use super::template_library::*;
use super::*;

// Nearest-template classifier over a fixed library
pub struct Matcher {
    library: TemplateLibrary,
}

impl Matcher {
    pub fn new(library: TemplateLibrary) -> Matcher {
        Matcher { library: library }
    }

    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    // Scores every mode-admitted pool entry, in pool order, into the collector.
    // Entries without a template cannot win and are skipped.
    pub fn lookup(&self, vector: &InkVector, pool: &[KanaSymbol], mode: Mode, collector: &mut MatchCollector) {
        for symbol in pool.iter().filter(|s| mode.admits(s.script)) {
            let template = match self.library.get(symbol.kana) {
                Some(template) => template,
                None => {
                    debug!(glyph = %symbol.kana, "no template; skipping candidate");
                    continue;
                }
            };
            collector.file_match(Match {
                glyph: symbol.kana,
                score: cosine_similarity(vector, &template.vector),
            });
        }
    }

    // Best `limit` candidates, highest score first
    pub fn top_matches(&self, vector: &InkVector, pool: &[KanaSymbol], mode: Mode, limit: usize) -> Vec<Match> {
        let mut res: Vec<Match> = Vec::with_capacity(limit);
        let mut collector = MatchCollector::new(&mut res, limit);
        self.lookup(vector, pool, mode, &mut collector);
        res
    }

    // The single best candidate; None if no candidate has a template
    pub fn classify(&self, vector: &InkVector, pool: &[KanaSymbol], mode: Mode) -> Option<Match> {
        let best = self.top_matches(vector, pool, mode, 1).into_iter().next();
        if let Some(mc) = &best {
            debug!(glyph = %mc.glyph, score = mc.score, %mode, "classified");
        }
        best
    }
}
