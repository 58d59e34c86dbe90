//! Contains the types that describe how difficult a text is to read.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Frequency band of a character.
/// Each band covers 500 ranks of the frequency table, the last band also holds unranked characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "LEVEL_1")]
    Level1,
    #[serde(rename = "LEVEL_2")]
    Level2,
    #[serde(rename = "LEVEL_3")]
    Level3,
    #[serde(rename = "LEVEL_4")]
    Level4,
    #[serde(rename = "LEVEL_5")]
    Level5,
    #[serde(rename = "LEVEL_6")]
    Level6,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Level1,
        Level::Level2,
        Level::Level3,
        Level::Level4,
        Level::Level5,
        Level::Level6,
    ];

    const BAND_SIZE: u32 = 500;

    /// The band for a 1-based frequency rank. `None` means the character is not in the table.
    pub fn from_rank(rank: Option<u32>) -> Self {
        match rank {
            Some(rank @ 1..) => match (rank - 1) / Self::BAND_SIZE {
                0 => Level::Level1,
                1 => Level::Level2,
                2 => Level::Level3,
                3 => Level::Level4,
                4 => Level::Level5,
                _ => Level::Level6,
            },
            _ => Level::Level6,
        }
    }

    /// How much the band contributes to the difficulty score.
    pub fn weight(self) -> f64 {
        match self {
            Level::Level1 => 0.0,
            Level::Level2 => 0.2,
            Level::Level3 => 0.4,
            Level::Level4 => 0.6,
            Level::Level5 => 0.8,
            Level::Level6 => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Level1 => "LEVEL_1",
            Level::Level2 => "LEVEL_2",
            Level::Level3 => "LEVEL_3",
            Level::Level4 => "LEVEL_4",
            Level::Level5 => "LEVEL_5",
            Level::Level6 => "LEVEL_6",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of analyzing a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyReport {
    /// Number of hanzi in the text, counting repeats.
    pub total_characters: usize,
    /// Number of distinct hanzi in the text.
    pub unique_characters: usize,
    /// Distinct hanzi per band.
    pub character_levels: BTreeMap<Level, usize>,
    /// Share of distinct hanzi per band as a percentage rounded to one decimal.
    pub level_distribution: BTreeMap<Level, f64>,
    /// 0 to 100, weighted by band.
    pub difficulty_score: u32,
    /// 1 (easiest) to 5 (hardest).
    pub difficulty_level: u8,
}

impl DifficultyReport {
    /// The report for a text without any hanzi.
    pub fn empty() -> Self {
        Self {
            total_characters: 0,
            unique_characters: 0,
            character_levels: Level::ALL.into_iter().map(|l| (l, 0)).collect(),
            level_distribution: Level::ALL.into_iter().map(|l| (l, 0.0)).collect(),
            difficulty_score: 0,
            difficulty_level: 1,
        }
    }

    /// The percentage for the given band, zero if missing.
    pub fn distribution(&self, level: Level) -> f64 {
        self.level_distribution.get(&level).copied().unwrap_or_default()
    }

    /// The distinct character count for the given band, zero if missing.
    pub fn count(&self, level: Level) -> usize {
        self.character_levels.get(&level).copied().unwrap_or_default()
    }
}
