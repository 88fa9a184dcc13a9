//! Whitespace, capitalization and terminal punctuation

/// Characters accepted as sentence terminators
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Check whether a character ends a sentence
#[inline]
pub fn is_terminator(ch: char) -> bool {
    TERMINATORS.contains(&ch)
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Uppercase the first character and make sure the text ends with `.`, `!`
/// or `?` (appending `.` otherwise). Empty input stays empty.
pub fn capitalize_and_punctuate(text: &str) -> String {
    let mut result = capitalize_first(text);
    if !ends_with_terminator(&result) && !result.is_empty() {
        result.push('.');
    }
    result
}

/// Uppercase only the first character of `text`.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut result = String::with_capacity(text.len());
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}

/// Check whether the last character is a sentence terminator
pub fn ends_with_terminator(text: &str) -> bool {
    text.chars().last().is_some_and(is_terminator)
}
