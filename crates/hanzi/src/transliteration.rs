//! Converting hanzi into pinyin.
//!
//! [`Transliterator`] is the seam between the segmenter and whatever produces the readings.
//! [`PinyinTransliterator`] is the default implementation, it takes per-character readings from the `pinyin` crate
//! and corrects heteronyms with a table of phrase readings so that e.g. 乐 is read `lè` in 快乐 but `yuè` in 音乐.

use hanzi_core::is_hanzi;
use pinyin::{Pinyin, ToPinyin, ToPinyinMulti};
use std::{collections::HashMap, fmt, fs, io, path::Path};
use thiserror::Error;

const BUNDLED_PHRASES: &str = include_str!("../data/phrase_pinyin.tsv");

/// How tones are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToneStyle {
    /// Tone marks over the vowel, `lǜ`.
    #[default]
    Symbol,
    /// Tone number after the syllable, `lü4`.
    Number,
    /// No tones, `lu`.
    None,
}

impl ToneStyle {
    fn format(self, pinyin: Pinyin) -> &'static str {
        match self {
            ToneStyle::Symbol => pinyin.with_tone(),
            ToneStyle::Number => pinyin.with_tone_num_end(),
            ToneStyle::None => pinyin.plain(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub tone_style: ToneStyle,
    /// Request every known reading. Only valid for a single character.
    pub multiple: bool,
}

impl Options {
    pub fn single(tone_style: ToneStyle) -> Self {
        Self {
            tone_style,
            multiple: false,
        }
    }

    pub fn multiple(tone_style: ToneStyle) -> Self {
        Self {
            tone_style,
            multiple: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransliterationError {
    #[error("Multiple readings can only be requested for a single character, got {0} characters")]
    MultipleReadingsNeedSingleCharacter(usize),
    #[error("Transliteration backend unavailable: {0}")]
    Unavailable(String),
}

/// Something that can turn text into pinyin.
pub trait Transliterator {
    /// Without `multiple`, returns one reading per code point of `text`.
    /// Hanzi get their reading in context, other characters are returned as they are.
    ///
    /// With `multiple`, `text` must be a single character and every reading of it is returned.
    fn transliterate(
        &self,
        text: &str,
        options: Options,
    ) -> Result<Vec<String>, TransliterationError>;
}

impl<T> Transliterator for &T
where
    T: Transliterator + ?Sized,
{
    fn transliterate(
        &self,
        text: &str,
        options: Options,
    ) -> Result<Vec<String>, TransliterationError> {
        (**self).transliterate(text, options)
    }
}

/// Transliterator backed by the `pinyin` crate and a phrase table.
#[derive(Clone)]
pub struct PinyinTransliterator {
    phrases: HashMap<String, Vec<Pinyin>>,
    longest_phrase: usize,
}

// `Pinyin` has no Debug impl
impl fmt::Debug for PinyinTransliterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinyinTransliterator")
            .field("phrases", &self.phrases.len())
            .field("longest_phrase", &self.longest_phrase)
            .finish()
    }
}

impl Default for PinyinTransliterator {
    fn default() -> Self {
        Self::new()
    }
}

impl PinyinTransliterator {
    /// Uses the phrase table bundled with the crate.
    pub fn new() -> Self {
        Self::with_phrases(BUNDLED_PHRASES)
    }

    /// Uses only the given phrase table, see [`PinyinTransliterator::add_phrases`] for the format.
    pub fn with_phrases(table: &str) -> Self {
        let mut transliterator = Self {
            phrases: HashMap::new(),
            longest_phrase: 0,
        };
        transliterator.add_phrases(table);
        transliterator
    }

    /// Uses the bundled phrase table extended with the table at `path`.
    pub fn load(path: &Path) -> io::Result<Self> {
        let table = fs::read_to_string(path)?;
        let mut transliterator = Self::new();
        transliterator.add_phrases(&table);
        Ok(transliterator)
    }

    /// Like [`PinyinTransliterator::load`], but logs the problem and keeps only the bundled table on failure.
    pub fn load_or_bundled(path: &Path) -> Self {
        match Self::load(path) {
            Ok(transliterator) => {
                tracing::info!(
                    "Loaded {} phrase readings with {}",
                    transliterator.phrase_count(),
                    path.display()
                );
                transliterator
            }
            Err(err) => {
                tracing::warn!(
                    "Failed to load phrase table from {}, using the bundled one: {err}",
                    path.display()
                );
                Self::new()
            }
        }
    }

    /// Adds phrase readings, replacing earlier readings of the same phrase. Returns the number of phrases added.
    ///
    /// The table has one phrase per line, formatted `{phrase}\t{syllable} {syllable}...` or
    /// `{phrase}: {syllable} {syllable}...` with tone marks.
    /// A single character line replaces the default reading of that character.
    /// Blank lines and lines starting with `#` are skipped.
    /// Lines that are malformed or that use a reading the character doesn't have are skipped.
    pub fn add_phrases(&mut self, table: &str) -> usize {
        let mut added = 0;
        let mut skipped = 0;
        for (idx, line) in table.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_phrase(line) {
                Some((phrase, readings)) => {
                    self.longest_phrase = self.longest_phrase.max(readings.len());
                    self.phrases.insert(phrase.to_string(), readings);
                    added += 1;
                }
                None => {
                    tracing::debug!("Skipping phrase on line {}: {line}", idx + 1);
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            tracing::warn!("Skipped {skipped} malformed or unknown phrase readings");
        }
        tracing::debug!("Loaded {added} phrase readings");
        added
    }

    /// Number of phrases in the table.
    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    // the readings of each character with phrase corrections applied
    // phrases are matched greedily from the left, longest first
    fn readings(&self, chars: &[char]) -> Vec<Option<Pinyin>> {
        let mut readings = chars
            .iter()
            .map(|c| {
                if is_hanzi(*c) {
                    c.to_pinyin()
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        let mut idx = 0;
        while idx < chars.len() {
            match self.longest_phrase_at(&chars[idx..]) {
                Some(phrase) => {
                    for (offset, reading) in phrase.iter().enumerate() {
                        readings[idx + offset] = Some(*reading);
                    }
                    idx += phrase.len();
                }
                None => idx += 1,
            }
        }
        readings
    }

    // every reading of the character, the default reading first
    fn all_readings(&self, c: char, tone_style: ToneStyle) -> Vec<String> {
        if !is_hanzi(c) {
            return vec![c.to_string()];
        }
        let Some(multi) = c.to_pinyin_multi() else {
            return vec![c.to_string()];
        };
        let mut buf = [0; 4];
        let preferred = self
            .phrases
            .get(&*c.encode_utf8(&mut buf))
            .and_then(|readings| readings.first())
            .copied();
        let mut readings = Vec::<String>::new();
        for reading in preferred.into_iter().chain(multi) {
            let formatted = tone_style.format(reading);
            // readings that only differ by tone collapse without tones
            if !readings.iter().any(|r| r == formatted) {
                readings.push(formatted.to_string());
            }
        }
        readings
    }

    fn longest_phrase_at(&self, chars: &[char]) -> Option<&[Pinyin]> {
        let max = self.longest_phrase.min(chars.len());
        (1..=max).rev().find_map(|len| {
            let candidate = chars[..len].iter().collect::<String>();
            self.phrases.get(&candidate).map(Vec::as_slice)
        })
    }
}

impl Transliterator for PinyinTransliterator {
    fn transliterate(
        &self,
        text: &str,
        options: Options,
    ) -> Result<Vec<String>, TransliterationError> {
        let chars = text.chars().collect::<Vec<_>>();
        if options.multiple {
            return match chars.as_slice() {
                [] => Ok(Vec::new()),
                [c] => Ok(self.all_readings(*c, options.tone_style)),
                _ => Err(TransliterationError::MultipleReadingsNeedSingleCharacter(
                    chars.len(),
                )),
            };
        }

        let readings = self
            .readings(&chars)
            .into_iter()
            .zip(&chars)
            .map(|(reading, c)| match reading {
                Some(reading) => options.tone_style.format(reading).to_string(),
                None if is_hanzi(*c) => String::new(),
                None => c.to_string(),
            })
            .collect();
        Ok(readings)
    }
}

// `{phrase}\t{syllables}` or `{phrase}: {syllables}`, with one known reading per character
fn parse_phrase(line: &str) -> Option<(&str, Vec<Pinyin>)> {
    let (phrase, syllables) = line
        .split_once('\t')
        .or_else(|| line.split_once(':'))?;
    let phrase = phrase.trim();
    let chars = phrase.chars().collect::<Vec<_>>();
    let syllables = syllables.split_whitespace().collect::<Vec<_>>();
    if chars.is_empty() || chars.len() != syllables.len() {
        return None;
    }
    let readings = chars
        .iter()
        .zip(&syllables)
        .map(|(c, syllable)| known_reading(*c, syllable))
        .collect::<Option<Vec<_>>>()?;
    Some((phrase, readings))
}

// finds the reading of `c` that is written as `syllable` with tone marks
fn known_reading(c: char, syllable: &str) -> Option<Pinyin> {
    c.to_pinyin_multi()?
        .into_iter()
        .find(|reading| reading.with_tone() == syllable)
}

#[cfg(test)]
mod test {
    use super::*;

    fn single(text: &str) -> Vec<String> {
        PinyinTransliterator::new()
            .transliterate(text, Options::default())
            .unwrap()
    }

    #[test]
    fn reads_simple_text() {
        assert_eq!(single("你好"), ["nǐ", "hǎo"]);
    }

    #[test]
    fn one_reading_per_code_point() {
        let text = "我喜欢coding！🎉";
        assert_eq!(single(text).len(), text.chars().count());
    }

    #[test]
    fn echoes_other_characters() {
        assert_eq!(single("a中！"), ["a", "zhōng", "！"]);
    }

    #[test]
    fn tone_styles() {
        let tl = PinyinTransliterator::new();
        let numbered = tl
            .transliterate("你好", Options::single(ToneStyle::Number))
            .unwrap();
        assert_eq!(numbered, ["ni3", "hao3"]);
        let plain = tl
            .transliterate("你好", Options::single(ToneStyle::None))
            .unwrap();
        assert_eq!(plain, ["ni", "hao"]);
    }

    #[test]
    fn resolves_heteronyms_from_phrases() {
        assert_eq!(single("音乐"), ["yīn", "yuè"]);
        assert_eq!(single("快乐"), ["kuài", "lè"]);
        assert_eq!(single("银行"), ["yín", "háng"]);
        assert_eq!(single("自行车"), ["zì", "xíng", "chē"]);
    }

    #[test]
    fn prefers_longest_phrase() {
        let tl = PinyinTransliterator::with_phrases("音乐\tyīn yuè\n音乐会\tyīn yuè huì\n乐会\tlè huì");
        let readings = tl.transliterate("音乐会", Options::default()).unwrap();
        assert_eq!(readings, ["yīn", "yuè", "huì"]);
    }

    #[test]
    fn multiple_readings_for_heteronym() {
        let tl = PinyinTransliterator::new();
        let readings = tl
            .transliterate("乐", Options::multiple(ToneStyle::Symbol))
            .unwrap();
        assert!(readings.len() > 1);
        assert!(readings.iter().any(|r| r == "lè"));
        assert!(readings.iter().any(|r| r == "yuè"));
    }

    #[test]
    fn multiple_readings_for_other_character() {
        let tl = PinyinTransliterator::new();
        let readings = tl
            .transliterate("!", Options::multiple(ToneStyle::Symbol))
            .unwrap();
        assert_eq!(readings, ["!"]);
    }

    #[test]
    fn multiple_readings_need_single_character() {
        let tl = PinyinTransliterator::new();
        let err = tl
            .transliterate("你好", Options::multiple(ToneStyle::Symbol))
            .unwrap_err();
        assert_eq!(
            err,
            TransliterationError::MultipleReadingsNeedSingleCharacter(2)
        );
    }

    #[test]
    fn empty_text() {
        let tl = PinyinTransliterator::new();
        assert!(tl.transliterate("", Options::default()).unwrap().is_empty());
        assert!(tl
            .transliterate("", Options::multiple(ToneStyle::Symbol))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn skips_bad_phrases() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let table = "# comment\n\n音乐\tyīn\n音乐\tyīn xyz\nnotab\n快乐\tkuài lè";
        let tl = PinyinTransliterator::with_phrases(table);
        assert_eq!(tl.phrase_count(), 1);
    }

    #[test]
    fn loads_bundled_phrases() {
        assert!(PinyinTransliterator::new().phrase_count() > 400);
    }

    #[test]
    fn resolves_common_heteronyms() {
        assert_eq!(single("很长"), ["hěn", "cháng"]);
        assert_eq!(single("长大"), ["zhǎng", "dà"]);
        assert_eq!(single("我觉得很好"), ["wǒ", "jué", "de", "hěn", "hǎo"]);
        assert_eq!(single("首都"), ["shǒu", "dū"]);
        assert_eq!(single("慢慢地走"), ["màn", "màn", "de", "zǒu"]);
        assert_eq!(single("了解"), ["liǎo", "jiě"]);
        assert_eq!(single("还书"), ["huán", "shū"]);
        assert_eq!(single("得到"), ["dé", "dào"]);
    }

    #[test]
    fn single_character_lines_replace_default() {
        let tl = PinyinTransliterator::with_phrases("长\tcháng");
        assert_eq!(tl.phrase_count(), 1);
        let readings = tl.transliterate("长", Options::default()).unwrap();
        assert_eq!(readings, ["cháng"]);
        let readings = tl
            .transliterate("长", Options::multiple(ToneStyle::Symbol))
            .unwrap();
        assert_eq!(readings[0], "cháng");
        assert!(readings.iter().any(|r| r == "zhǎng"));
        assert_eq!(readings.iter().filter(|r| *r == "cháng").count(), 1);
    }

    #[test]
    fn reads_colon_separated_phrases() {
        let tl = PinyinTransliterator::with_phrases("首都: shǒu dū\n还书: huán shū\n");
        assert_eq!(tl.phrase_count(), 2);
        let readings = tl.transliterate("首都", Options::default()).unwrap();
        assert_eq!(readings, ["shǒu", "dū"]);
    }

    #[test]
    fn later_phrases_replace_earlier() {
        let mut tl = PinyinTransliterator::with_phrases("银行\tyín háng");
        assert_eq!(tl.add_phrases("银行\tyín xíng"), 1);
        assert_eq!(tl.phrase_count(), 1);
        let readings = tl.transliterate("银行", Options::default()).unwrap();
        assert_eq!(readings, ["yín", "xíng"]);
    }

    #[test]
    fn loads_extra_phrases_from_file() {
        use std::io::Write;

        let bundled = PinyinTransliterator::new().phrase_count();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "调查: diào chá").unwrap();
        writeln!(file, "音乐: yīn yuè").unwrap();
        let tl = PinyinTransliterator::load(file.path()).unwrap();
        assert_eq!(tl.phrase_count(), bundled + 1);
        assert_eq!(
            PinyinTransliterator::load_or_bundled(file.path()).phrase_count(),
            bundled + 1
        );
    }

    #[test]
    fn missing_phrase_file_keeps_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        assert!(PinyinTransliterator::load(&path).is_err());
        assert_eq!(
            PinyinTransliterator::load_or_bundled(&path).phrase_count(),
            PinyinTransliterator::new().phrase_count()
        );
    }

    #[test]
    fn debug_summarizes_table() {
        let tl = PinyinTransliterator::with_phrases("音乐\tyīn yuè");
        let debug = format!("{tl:?}");
        assert!(debug.contains("PinyinTransliterator"));
        assert!(debug.contains("longest_phrase: 2"));
        let segmenter = crate::Segmenter::new(tl);
        assert!(format!("{segmenter:?}").contains("Segmenter"));
    }
}
