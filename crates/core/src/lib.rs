//! hanzi core types and functions.

use std::ops::RangeInclusive;

pub mod difficulty;
pub mod token;

pub use difficulty::{DifficultyReport, Level};
pub use token::CharacterToken;

/// Unicode CJK Unified Ideographs.
pub const HANZI_RANGE: RangeInclusive<char> = '\u{4E00}'..='\u{9FFF}';

/// Whether the character is a CJK Unified Ideograph.
/// Everything else, including CJK punctuation and the extension blocks, is not counted as hanzi.
pub fn is_hanzi(c: char) -> bool {
    HANZI_RANGE.contains(&c)
}
