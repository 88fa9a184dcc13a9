//! Punctuation-driven sentence segmentation
//!
//! Splits after every run of `.`, `!` or `?`. There is no abbreviation or
//! decimal handling: `"Dr. Smith"` becomes `"Dr."` and `"Smith"`.

use super::normalize::{is_terminator, normalize};

/// A single sentence produced by [`segment`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    text: String,
    offset: usize,
}

impl Sentence {
    /// Create a sentence from already-normalized text
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }

    /// Sentence text with whitespace collapsed
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Byte offset of the sentence start in the segmented input
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the sentence ends with terminal punctuation
    pub fn is_terminated(&self) -> bool {
        self.text.chars().last().is_some_and(is_terminator)
    }

    /// Consume the sentence, returning its text
    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for Sentence {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Split `text` into sentences.
///
/// Terminators stay attached to the sentence they close, and consecutive
/// terminators (`"?!"`, `"..."`) close a single sentence. A trailing fragment
/// without punctuation is returned as the last sentence. Returns an empty
/// vector only for empty or whitespace-only input.
pub fn segment(text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_terminator(ch) {
            continue;
        }
        if chars.peek().is_some_and(|&(_, next)| is_terminator(next)) {
            continue;
        }
        let end = idx + ch.len_utf8();
        push_fragment(&mut sentences, text, start, end);
        start = end;
    }

    push_fragment(&mut sentences, text, start, text.len());
    sentences
}

/// Join sentences with single spaces
pub fn join<S: AsRef<str>>(sentences: &[S]) -> String {
    sentences
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_fragment(out: &mut Vec<Sentence>, text: &str, start: usize, end: usize) {
    let raw = &text[start..end];
    let leading = raw.len() - raw.trim_start().len();
    let fragment = normalize(raw);
    if !fragment.is_empty() {
        out.push(Sentence::new(fragment, start + leading));
    }
}
