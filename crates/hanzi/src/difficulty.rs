//! Scores how difficult a text is based on how frequent its hanzi are.

use crate::{frequency::FrequencyTable, hanzi_from_text};
use hanzi_core::{DifficultyReport, Level};
use std::collections::{BTreeMap, HashSet};

/// A band needs more than this share of the distinct characters to decide the difficulty level.
const LEVEL_THRESHOLD: f64 = 10.0;

/// Analyzes texts against a frequency table.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyAnalyzer<'t> {
    table: &'t FrequencyTable,
}

impl<'t> DifficultyAnalyzer<'t> {
    pub fn new(table: &'t FrequencyTable) -> Self {
        Self { table }
    }

    pub fn analyze(&self, text: &str) -> DifficultyReport {
        let hanzi = hanzi_from_text(text).collect::<Vec<_>>();
        let unique = unique_in_order(&hanzi);
        if unique.is_empty() {
            return DifficultyReport::empty();
        }

        let mut character_levels = Level::ALL
            .into_iter()
            .map(|l| (l, 0))
            .collect::<BTreeMap<_, _>>();
        for c in &unique {
            *character_levels.entry(self.table.level(*c)).or_default() += 1;
        }

        let unique_count = unique.len() as f64;
        let level_distribution = character_levels
            .iter()
            .map(|(level, count)| (*level, round1(*count as f64 / unique_count * 100.0)))
            .collect::<BTreeMap<_, _>>();
        let difficulty_score = score(&level_distribution);
        let difficulty_level = classify(&level_distribution);

        tracing::debug!(
            "Analyzed {} hanzi ({} distinct), score {difficulty_score}, level {difficulty_level}",
            hanzi.len(),
            unique.len()
        );
        DifficultyReport {
            total_characters: hanzi.len(),
            unique_characters: unique.len(),
            character_levels,
            level_distribution,
            difficulty_score,
            difficulty_level,
        }
    }

    /// The distinct hanzi of the text grouped by band, in order of first appearance.
    pub fn unique_by_level(&self, text: &str) -> BTreeMap<Level, Vec<char>> {
        let hanzi = hanzi_from_text(text).collect::<Vec<_>>();
        let mut by_level = Level::ALL
            .into_iter()
            .map(|l| (l, Vec::new()))
            .collect::<BTreeMap<_, _>>();
        for c in unique_in_order(&hanzi) {
            by_level.entry(self.table.level(c)).or_default().push(c);
        }
        by_level
    }
}

/// Analyzes the text against the given table.
pub fn analyze(text: &str, table: &FrequencyTable) -> DifficultyReport {
    DifficultyAnalyzer::new(table).analyze(text)
}

fn unique_in_order(chars: &[char]) -> Vec<char> {
    let mut seen = HashSet::new();
    chars.iter().copied().filter(|c| seen.insert(*c)).collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// weighted average of the bands, 0 to 100
fn score(distribution: &BTreeMap<Level, f64>) -> u32 {
    let total = distribution.values().sum::<f64>();
    if total <= 0.0 {
        return 0;
    }
    let weighted = distribution
        .iter()
        .map(|(level, share)| share * level.weight())
        .sum::<f64>();
    (weighted / total * 100.0).round() as u32
}

// the hardest band with a notable share decides, bands are checked on their own rather than cumulatively
fn classify(distribution: &BTreeMap<Level, f64>) -> u8 {
    let share = |level| distribution.get(&level).copied().unwrap_or_default();
    if share(Level::Level5) + share(Level::Level6) > LEVEL_THRESHOLD {
        5
    } else if share(Level::Level4) > LEVEL_THRESHOLD {
        4
    } else if share(Level::Level3) > LEVEL_THRESHOLD {
        3
    } else if share(Level::Level2) > LEVEL_THRESHOLD {
        2
    } else {
        1
    }
}
