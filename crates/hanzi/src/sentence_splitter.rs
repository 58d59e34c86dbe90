//! Contains SentenceSplitter, an Iterator that iterates through Chinese sentences in a string.

/// Characters that end a sentence.
pub const SENTENCE_ENDERS: [char; 4] = ['。', '！', '？', '；'];

/// Splits text into sentences.
/// Each sentence keeps the punctuation that ended it, and the text after the last sentence ender is yielded as is.
/// Nothing is trimmed, so the sentences always concatenate back into the original text.
#[derive(Debug, Clone)]
pub struct SentenceSplitter<'a> {
    idx: usize,
    s: &'a str,
}

impl<'a> SentenceSplitter<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { idx: 0, s }
    }
}

impl<'a> Iterator for SentenceSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start_idx = self.idx;
        let next_chunk = self.s.get(start_idx..)?;
        if next_chunk.is_empty() {
            return None;
        }

        for c in next_chunk.chars() {
            self.idx += c.len_utf8();
            if SENTENCE_ENDERS.contains(&c) {
                return Some(&self.s[start_idx..self.idx]);
            }
        }

        // no ender, the rest of the text is the last sentence
        Some(&self.s[start_idx..])
    }
}

/// Collects the sentences of the text.
pub fn sentence_split(text: &str) -> Vec<&str> {
    SentenceSplitter::new(text).collect()
}
