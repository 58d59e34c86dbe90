//! Provides all of hanzi's core functionality:
//! splitting text into sentences, annotating characters with pinyin and scoring how difficult a text is to read.

pub mod difficulty;
pub mod frequency;
pub mod segmenter;
pub mod sentence_splitter;
pub mod transliteration;

pub use difficulty::{analyze, DifficultyAnalyzer};
pub use frequency::{FrequencyTable, FrequencyTableError};
pub use hanzi_core::{is_hanzi, CharacterToken, DifficultyReport, Level};
pub use segmenter::{process_chinese_text, ProcessedSentence, Resolution, Segmenter};
pub use sentence_splitter::{sentence_split, SentenceSplitter};
pub use transliteration::{PinyinTransliterator, ToneStyle, Transliterator};

/// The hanzi in the text in order of appearance, including repeats.
pub fn hanzi_from_text(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| is_hanzi(*c))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn filters_hanzi() {
        let hanzi = hanzi_from_text("我喜欢coding！🎉 Let's learn 中文 together。").collect::<String>();
        assert_eq!(hanzi, "我喜欢中文");
    }

    #[test]
    fn keeps_repeats() {
        assert_eq!(hanzi_from_text("好好，好").count(), 3);
    }
}
