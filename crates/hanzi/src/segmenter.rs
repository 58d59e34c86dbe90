//! Turns text into per-character tokens with pinyin.
//!
//! Each sentence is first read as a whole so that heteronyms get the reading that fits the context.
//! If the whole-sentence reading can't be used, every hanzi is read on its own instead.
//! Neither path fails, a character that can't be read at all simply gets an empty reading.

use crate::{
    sentence_splitter::SentenceSplitter,
    transliteration::{Options, PinyinTransliterator, ToneStyle, TransliterationError, Transliterator},
};
use hanzi_core::{is_hanzi, CharacterToken};

/// The outcome of reading a whole sentence in one go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceReading {
    /// One syllable per character of the sentence.
    Matched(Vec<String>),
    /// The backend returned a different number of syllables than the sentence has characters.
    LengthMismatch { expected: usize, actual: usize },
    /// The backend failed.
    Failed(TransliterationError),
}

/// Reads the whole sentence with the backend and checks that the result lines up with the characters.
pub fn read_sentence<T: Transliterator>(
    backend: &T,
    sentence: &str,
    tone_style: ToneStyle,
) -> SentenceReading {
    let expected = sentence.chars().count();
    match backend.transliterate(sentence, Options::single(tone_style)) {
        Ok(syllables) if syllables.len() == expected => SentenceReading::Matched(syllables),
        Ok(syllables) => SentenceReading::LengthMismatch {
            expected,
            actual: syllables.len(),
        },
        Err(err) => SentenceReading::Failed(err),
    }
}

/// How the readings of a sentence were resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Read as a whole sentence.
    Context,
    /// Read character by character.
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    LengthMismatch { expected: usize, actual: usize },
    Backend(TransliterationError),
}

/// The tokens of one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedSentence {
    pub sentence: String,
    pub tokens: Vec<CharacterToken>,
    pub resolution: Resolution,
}

impl ProcessedSentence {
    pub fn resolved_by_context(&self) -> bool {
        self.resolution == Resolution::Context
    }
}

/// Splits text into sentences and annotates each character with pinyin.
#[derive(Debug, Clone)]
pub struct Segmenter<T> {
    backend: T,
    tone_style: ToneStyle,
}

impl Default for Segmenter<PinyinTransliterator> {
    fn default() -> Self {
        Self::new(PinyinTransliterator::new())
    }
}

impl<T: Transliterator> Segmenter<T> {
    /// Creates a segmenter that writes tones as marks.
    pub fn new(backend: T) -> Self {
        Self {
            backend,
            tone_style: ToneStyle::Symbol,
        }
    }

    pub fn with_tone_style(mut self, tone_style: ToneStyle) -> Self {
        self.tone_style = tone_style;
        self
    }

    /// Produces one token per character of the text.
    pub fn process_text(&self, text: &str) -> Vec<CharacterToken> {
        if text.is_empty() {
            return Vec::new();
        }
        let mut tokens = Vec::with_capacity(text.chars().count());
        for sentence in SentenceSplitter::new(text) {
            tokens.extend(self.process_sentence(sentence).tokens);
        }
        tokens
    }

    /// Like [`Segmenter::process_text`], but keeps the sentences and how each one was resolved.
    pub fn process_text_detailed(&self, text: &str) -> Vec<ProcessedSentence> {
        SentenceSplitter::new(text)
            .map(|sentence| self.process_sentence(sentence))
            .collect()
    }

    /// Produces one token per character of the sentence.
    pub fn process_sentence(&self, sentence: &str) -> ProcessedSentence {
        let reading = read_sentence(&self.backend, sentence, self.tone_style);
        let (tokens, resolution) = match reading {
            SentenceReading::Matched(syllables) => {
                let tokens = sentence
                    .chars()
                    .zip(syllables)
                    .map(|(c, syllable)| {
                        if is_hanzi(c) {
                            CharacterToken::with_pinyin(c, vec![syllable])
                        } else {
                            CharacterToken::other(c)
                        }
                    })
                    .collect();
                (tokens, Resolution::Context)
            }
            SentenceReading::LengthMismatch { expected, actual } => {
                tracing::debug!(
                    "Reading {sentence} character by character, expected {expected} syllables but got {actual}"
                );
                let tokens = self.process_characters(sentence);
                let reason = FallbackReason::LengthMismatch { expected, actual };
                (tokens, Resolution::Fallback(reason))
            }
            SentenceReading::Failed(err) => {
                tracing::warn!("Failed to read {sentence} as a sentence: {err}");
                let tokens = self.process_characters(sentence);
                (tokens, Resolution::Fallback(FallbackReason::Backend(err)))
            }
        };
        ProcessedSentence {
            sentence: sentence.to_string(),
            tokens,
            resolution,
        }
    }

    fn process_characters(&self, sentence: &str) -> Vec<CharacterToken> {
        sentence
            .chars()
            .map(|c| {
                if !is_hanzi(c) {
                    return CharacterToken::other(c);
                }
                let options = Options::multiple(self.tone_style);
                match self.backend.transliterate(c.encode_utf8(&mut [0; 4]), options) {
                    Ok(readings) => CharacterToken::with_pinyin(c, readings),
                    Err(err) => {
                        tracing::warn!("Failed to read {c}: {err}");
                        CharacterToken::other(c)
                    }
                }
            })
            .collect()
    }
}

/// Segments the text with the default pinyin backend.
pub fn process_chinese_text(text: &str) -> Vec<CharacterToken> {
    Segmenter::<PinyinTransliterator>::default().process_text(text)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    fn pinyin_of(tokens: &[CharacterToken]) -> Vec<Vec<String>> {
        tokens.iter().map(|t| t.pinyin.clone()).collect()
    }

    // always returns one syllable too many
    struct Overlong;

    impl Transliterator for Overlong {
        fn transliterate(
            &self,
            text: &str,
            options: Options,
        ) -> Result<Vec<String>, TransliterationError> {
            if options.multiple {
                Ok(vec![format!("{text}1"), format!("{text}2")])
            } else {
                Ok(vec!["x".to_string(); text.chars().count() + 1])
            }
        }
    }

    // fails for whole sentences, reads single characters
    struct Broken {
        calls: Cell<usize>,
    }

    impl Transliterator for Broken {
        fn transliterate(
            &self,
            text: &str,
            options: Options,
        ) -> Result<Vec<String>, TransliterationError> {
            self.calls.set(self.calls.get() + 1);
            if options.multiple {
                Ok(vec![format!("{text}!")])
            } else {
                Err(TransliterationError::Unavailable("offline".to_string()))
            }
        }
    }

    // fails for everything
    struct Offline;

    impl Transliterator for Offline {
        fn transliterate(&self, _: &str, _: Options) -> Result<Vec<String>, TransliterationError> {
            Err(TransliterationError::Unavailable("offline".to_string()))
        }
    }

    // returns nothing for single characters
    struct Empty;

    impl Transliterator for Empty {
        fn transliterate(&self, _: &str, _: Options) -> Result<Vec<String>, TransliterationError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn empty_text() {
        assert!(process_chinese_text("").is_empty());
        assert!(Segmenter::<PinyinTransliterator>::default().process_text_detailed("").is_empty());
    }

    #[test]
    fn resolves_heteronyms_in_context() {
        let text = "听到欢乐的音乐我会快快乐乐。";
        let tokens = process_chinese_text(text);
        assert_eq!(tokens.len(), text.chars().count());

        let le = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.characters == "乐")
            .map(|(idx, t)| (idx, t.pinyin.clone()))
            .collect::<Vec<_>>();
        assert_eq!(le.len(), 4);
        // 欢乐
        assert_eq!(le[0], (3, vec!["lè".to_string()]));
        // 音乐
        assert_eq!(le[1], (6, vec!["yuè".to_string()]));
        // 快快乐乐
        assert_eq!(le[2].1, ["lè"]);
        assert_eq!(le[3].1, ["lè"]);
    }

    #[test]
    fn one_token_per_code_point() {
        let texts = [
            "你好！你是谁？",
            "我喜欢coding！🎉 Let's learn 中文 together。",
            "没有标点",
            "  。。",
            "👨‍👩‍👧",
        ];
        for text in texts {
            let tokens = process_chinese_text(text);
            assert_eq!(tokens.len(), text.chars().count(), "{text}");
            let joined = tokens.iter().map(|t| t.characters.as_str()).collect::<String>();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn other_characters_have_empty_pinyin() {
        let tokens = process_chinese_text("我喜欢coding！🎉 Let's learn 中文 together。");
        for token in &tokens {
            let c = token.characters.chars().next().unwrap();
            if is_hanzi(c) {
                assert!(token.has_reading(), "{c}");
            } else {
                assert_eq!(token.pinyin, [""], "{c}");
            }
            assert!(token.meaning.is_empty());
        }
    }

    #[test]
    fn reads_simple_sentence() {
        let tokens = process_chinese_text("你好！");
        assert_eq!(pinyin_of(&tokens), [vec!["nǐ"], vec!["hǎo"], vec![""]]);
    }

    #[test]
    fn tone_style_is_used() {
        let segmenter = Segmenter::<PinyinTransliterator>::default().with_tone_style(ToneStyle::Number);
        let tokens = segmenter.process_text("你好");
        assert_eq!(pinyin_of(&tokens), [vec!["ni3"], vec!["hao3"]]);
    }

    #[test]
    fn deterministic() {
        let text = "听到欢乐的音乐我会快快乐乐。";
        assert_eq!(process_chinese_text(text), process_chinese_text(text));
    }

    #[test]
    fn detailed_keeps_sentences() {
        let sentences = Segmenter::<PinyinTransliterator>::default().process_text_detailed("你好！你是谁？");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].sentence, "你好！");
        assert_eq!(sentences[1].sentence, "你是谁？");
        assert!(sentences.iter().all(ProcessedSentence::resolved_by_context));
    }

    #[test]
    fn falls_back_on_length_mismatch() {
        let segmenter = Segmenter::new(Overlong);
        let processed = segmenter.process_sentence("你a");
        assert_eq!(
            processed.resolution,
            Resolution::Fallback(FallbackReason::LengthMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(
            pinyin_of(&processed.tokens),
            [vec!["你1", "你2"], vec![""]]
        );
    }

    #[test]
    fn falls_back_on_backend_failure() {
        let backend = Broken {
            calls: Cell::new(0),
        };
        let segmenter = Segmenter::new(&backend);
        let processed = segmenter.process_sentence("好的。");
        assert!(matches!(
            processed.resolution,
            Resolution::Fallback(FallbackReason::Backend(_))
        ));
        assert_eq!(
            pinyin_of(&processed.tokens),
            [vec!["好!"], vec!["的!"], vec![""]]
        );
        // one sentence call, one call per hanzi
        assert_eq!(backend.calls.get(), 3);
    }

    #[test]
    fn failing_backend_gives_empty_readings() {
        let tokens = Segmenter::new(Offline).process_text("你好。ok");
        assert_eq!(tokens.len(), 5);
        assert!(tokens.iter().all(|t| t.pinyin == [""]));
    }

    #[test]
    fn empty_backend_result_gives_empty_reading() {
        let tokens = Segmenter::new(Empty).process_text("你好");
        assert_eq!(pinyin_of(&tokens), [vec![""], vec![""]]);
    }

    #[test]
    fn read_sentence_discriminates() {
        let tl = PinyinTransliterator::new();
        assert_eq!(
            read_sentence(&tl, "你好", ToneStyle::Symbol),
            SentenceReading::Matched(vec!["nǐ".to_string(), "hǎo".to_string()])
        );
        assert_eq!(
            read_sentence(&Overlong, "你好", ToneStyle::Symbol),
            SentenceReading::LengthMismatch {
                expected: 2,
                actual: 3
            }
        );
        assert!(matches!(
            read_sentence(&Offline, "你好", ToneStyle::Symbol),
            SentenceReading::Failed(_)
        ));
    }
}
