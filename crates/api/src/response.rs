//! Types for responses from the server to clients.

pub use hanzi_core::{CharacterToken, DifficultyReport, Level};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segmented {
    pub sentences: Vec<SegmentedSentence>,
}

impl Segmented {
    /// All tokens in order.
    pub fn tokens(&self) -> impl Iterator<Item = &CharacterToken> {
        self.sentences.iter().flat_map(|s| &s.tokens)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentedSentence {
    pub sentence: String,
    pub tokens: Vec<CharacterToken>,
    /// False if the readings were looked up character by character and heteronyms may be wrong.
    pub resolved_by_context: bool,
}
