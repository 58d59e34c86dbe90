//! Contains the token type produced when a text is segmented for display.

use serde::{Deserialize, Serialize};

/// A single character of a text together with its reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterToken {
    /// The character as it appears in the text. Always a single code point.
    pub characters: String,
    /// The romanised syllables for the character.
    /// Never empty, characters without a reading have a single empty string.
    pub pinyin: Vec<String>,
    /// Reserved for a gloss, currently always empty.
    pub meaning: String,
}

impl CharacterToken {
    /// A token without a reading, used for punctuation, latin text, emoji etc.
    pub fn other(c: char) -> Self {
        Self {
            characters: c.to_string(),
            pinyin: vec![String::new()],
            meaning: String::new(),
        }
    }

    /// A token with the given readings.
    /// An empty list is replaced with a single empty reading.
    pub fn with_pinyin(c: char, pinyin: Vec<String>) -> Self {
        let pinyin = if pinyin.is_empty() {
            vec![String::new()]
        } else {
            pinyin
        };
        Self {
            characters: c.to_string(),
            pinyin,
            meaning: String::new(),
        }
    }

    /// Whether the token carries an actual reading.
    pub fn has_reading(&self) -> bool {
        self.pinyin.iter().any(|p| !p.is_empty())
    }
}
