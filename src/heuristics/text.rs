//! Shared text splitting helpers for the heuristics.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A blank line, possibly containing whitespace.
    static ref BLANK_LINE: Regex = Regex::new(r"\n[ \t\r]*\n\s*").unwrap();
    /// Sentence terminators.
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]").unwrap();
}

/// Split text into trimmed, non-empty paragraphs on blank-line boundaries.
pub fn paragraphs(text: &str) -> Vec<&str> {
    BLANK_LINE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Split a paragraph into trimmed, non-empty sentences without their terminators.
pub fn sentences(paragraph: &str) -> Vec<&str> {
    SENTENCE_END
        .split(paragraph)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// The first run of characters up to a sentence terminator.
pub fn first_sentence(paragraph: &str) -> &str {
    match SENTENCE_END.find(paragraph) {
        Some(m) => &paragraph[..m.start()],
        None => paragraph,
    }
}

/// Build a case-insensitive whole-word matcher for `word`.
pub fn word_matcher(word: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))).unwrap()
}

/// Build a case-insensitive matcher hitting any of `words` as a whole word.
pub fn any_word_matcher(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).unwrap()
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Truncate to `max` characters, appending an ellipsis when anything was cut.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
