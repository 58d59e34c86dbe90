//! Models and parses character frequency tables.
//!
//! A table lists hanzi from the most to the least frequent, formatted `{rank}\t{character}` with optional extra columns.
//! The table is loaded once and handed to whatever needs it, there is no global instance.

use hanzi_core::{is_hanzi, Level};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use thiserror::Error;

const BUNDLED_TABLE: &str = include_str!("../data/char_frequency.tsv");

#[derive(Debug, Error)]
pub enum FrequencyTableError {
    #[error("Failed to read frequency table")]
    Io(#[from] std::io::Error),
    #[error("Malformed line {line}: {content}")]
    Malformed { line: usize, content: String },
    #[error("Invalid rank on line {line}: {rank}")]
    InvalidRank { line: usize, rank: String },
    #[error("Line {line} should contain a single hanzi, got {content}")]
    NotHanzi { line: usize, content: String },
    #[error("{character} appears more than once, again on line {line}")]
    DuplicateCharacter { line: usize, character: char },
    #[error("Rank {rank} appears more than once, again on line {line}")]
    DuplicateRank { line: usize, rank: u32 },
    #[error("Ranks should run from 1 without gaps, rank {missing} is missing")]
    MissingRank { missing: u32 },
}

/// Frequency ranks of hanzi, rank 1 being the most frequent.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    ranks: HashMap<char, u32>,
    // indexed by rank - 1
    by_rank: Vec<char>,
}

impl FrequencyTable {
    /// A table without any characters, every character is unranked.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table bundled with the crate.
    /// Falls back to an empty table if the bundled data can't be parsed.
    pub fn bundled() -> Self {
        match Self::parse(BUNDLED_TABLE) {
            Ok(table) => table,
            Err(err) => {
                tracing::error!("Bundled frequency table is invalid: {err}");
                Self::empty()
            }
        }
    }

    /// Parses a table.
    /// Blank lines and lines starting with `#` are skipped, columns after the second are ignored.
    pub fn parse(text: &str) -> Result<Self, FrequencyTableError> {
        let mut ranks = HashMap::new();
        let mut rank_to_char = HashMap::<u32, char>::new();
        for (idx, line) in text.lines().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut columns = trimmed.split('\t').map(str::trim);
            let (Some(rank), Some(character)) = (columns.next(), columns.next()) else {
                return Err(FrequencyTableError::Malformed {
                    line: line_number,
                    content: line.to_string(),
                });
            };
            let rank = match rank.parse::<u32>() {
                Ok(rank) if rank > 0 => rank,
                _ => {
                    return Err(FrequencyTableError::InvalidRank {
                        line: line_number,
                        rank: rank.to_string(),
                    })
                }
            };
            let mut chars = character.chars();
            let character = match (chars.next(), chars.next()) {
                (Some(c), None) if is_hanzi(c) => c,
                _ => {
                    return Err(FrequencyTableError::NotHanzi {
                        line: line_number,
                        content: character.to_string(),
                    })
                }
            };

            if ranks.insert(character, rank).is_some() {
                return Err(FrequencyTableError::DuplicateCharacter {
                    line: line_number,
                    character,
                });
            }
            if rank_to_char.insert(rank, character).is_some() {
                return Err(FrequencyTableError::DuplicateRank {
                    line: line_number,
                    rank,
                });
            }
        }

        let mut by_rank = Vec::with_capacity(rank_to_char.len());
        for rank in 1..=rank_to_char.len() as u32 {
            match rank_to_char.get(&rank) {
                Some(c) => by_rank.push(*c),
                None => return Err(FrequencyTableError::MissingRank { missing: rank }),
            }
        }

        Ok(Self { ranks, by_rank })
    }

    pub fn from_reader<R: Read>(mut r: R) -> Result<Self, FrequencyTableError> {
        let mut text = String::new();
        r.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    pub fn load(path: &Path) -> Result<Self, FrequencyTableError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads the table, or logs the problem and returns an empty table.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(table) => {
                tracing::info!(
                    "Loaded {} ranked characters from {}",
                    table.len(),
                    path.display()
                );
                table
            }
            Err(err) => {
                tracing::warn!(
                    "Failed to load frequency table from {}, every character will be treated as unranked: {err}",
                    path.display()
                );
                Self::empty()
            }
        }
    }

    /// Builds a table from characters ordered from most to least frequent.
    /// Non-hanzi and repeated characters are skipped.
    pub fn from_ordered<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut table = Self::empty();
        for c in chars {
            if !is_hanzi(c) || table.ranks.contains_key(&c) {
                continue;
            }
            table.by_rank.push(c);
            table.ranks.insert(c, table.by_rank.len() as u32);
        }
        table
    }

    pub fn rank(&self, c: char) -> Option<u32> {
        self.ranks.get(&c).copied()
    }

    pub fn level(&self, c: char) -> Level {
        Level::from_rank(self.rank(c))
    }

    pub fn len(&self) -> usize {
        self.by_rank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_rank.is_empty()
    }

    /// The entries in rank order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, char)> + '_ {
        self.by_rank
            .iter()
            .enumerate()
            .map(|(idx, c)| (idx as u32 + 1, *c))
    }

    /// Writes the table in the format [`FrequencyTable::parse`] reads.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for (rank, c) in self.entries() {
            out.push_str(&format!("{rank}\t{c}\n"));
        }
        out
    }
}
