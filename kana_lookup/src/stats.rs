use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::error::*;

// Receives one report per graded prompt
pub trait StatsSink {
    fn record(&mut self, glyph: char, was_correct: bool) -> Result<()>;
}

/// Lifetime tallies across sessions, with per-glyph miss counts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct KanaLifetimeStats {
    pub correct: u64,
    pub incorrect: u64,
    pub weak_symbols: BTreeMap<char, u32>,
}

impl KanaLifetimeStats {
    pub fn record(&mut self, glyph: char, was_correct: bool) {
        if was_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
            *self.weak_symbols.entry(glyph).or_insert(0) += 1;
        }
    }

    // Most-missed glyphs first; equal counts keep glyph order
    pub fn weakest(&self, n: usize) -> Vec<(char, u32)> {
        let mut res: Vec<(char, u32)> = self.weak_symbols.iter().map(|(g, m)| (*g, *m)).collect();
        res.sort_by(|a, b| b.1.cmp(&a.1));
        res.truncate(n);
        res
    }

    pub fn weakest_preview(&self) -> String {
        let top = self.weakest(5);
        if top.is_empty() {
            return "No weak symbols yet".to_string();
        }
        top.iter()
            .map(|(glyph, misses)| format!("{} ({})", glyph, misses))
            .collect::<Vec<String>>()
            .join(", ")
    }
}

impl StatsSink for KanaLifetimeStats {
    fn record(&mut self, glyph: char, was_correct: bool) -> Result<()> {
        KanaLifetimeStats::record(self, glyph, was_correct);
        Ok(())
    }
}

/// Lifetime stats persisted as JSON, rewritten after every report.
pub struct JsonStatsStore {
    path: PathBuf,
    stats: KanaLifetimeStats,
}

impl JsonStatsStore {
    // Missing or unreadable files start from empty stats
    pub fn open(path: &Path) -> JsonStatsStore {
        let stats = match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(stats) => stats,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "discarding corrupt stats file");
                    KanaLifetimeStats::default()
                }
            },
            Err(_) => KanaLifetimeStats::default(),
        };
        JsonStatsStore {
            path: path.to_path_buf(),
            stats: stats,
        }
    }

    pub fn stats(&self) -> &KanaLifetimeStats {
        &self.stats
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string(&self.stats)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.stats = KanaLifetimeStats::default();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl StatsSink for JsonStatsStore {
    fn record(&mut self, glyph: char, was_correct: bool) -> Result<()> {
        self.stats.record(glyph, was_correct);
        self.save()
    }
}
