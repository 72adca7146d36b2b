//! Bullet-point extraction by sentence selection.

use super::text;
use lazy_static::lazy_static;
use regex::Regex;

/// Maximum number of bullet points returned.
pub const MAX_BULLETS: usize = 7;

/// Below this many sentences, long texts fall back to raw paragraphs.
const MIN_SENTENCES: usize = 3;

/// Raw-paragraph bullets are cut to this many characters.
const MAX_PARAGRAPH_BULLET_CHARS: usize = 100;

const IMPORTANCE_WORDS: [&str; 17] = [
    "important",
    "key",
    "significant",
    "essential",
    "crucial",
    "critical",
    "main",
    "primary",
    "conclusion",
    "therefore",
    "thus",
    "consequently",
    "finally",
    "summary",
    "result",
    "notably",
    "ultimately",
];

lazy_static! {
    static ref IMPORTANCE: Regex = text::any_word_matcher(&IMPORTANCE_WORDS);
}

/// Pick up to seven summary-worthy sentences from `source`.
///
/// Each paragraph contributes its first sentence; sentences containing an
/// importance word are added after. Results are sentences ending in a period.
pub fn extract_bullet_points(source: &str) -> Vec<String> {
    let paragraphs = text::paragraphs(source);
    let per_paragraph: Vec<Vec<String>> = paragraphs
        .iter()
        .map(|p| {
            text::sentences(p)
                .into_iter()
                .map(|s| format!("{}.", s))
                .collect()
        })
        .collect();

    let mut bullets: Vec<String> = Vec::new();

    for first in per_paragraph.iter().filter_map(|s| s.first()) {
        if !bullets.contains(first) {
            bullets.push(first.clone());
        }
    }

    for sentence in per_paragraph.iter().flatten() {
        if IMPORTANCE.is_match(sentence) && !bullets.contains(sentence) {
            bullets.push(sentence.clone());
        }
    }

    if bullets.len() > MAX_BULLETS {
        return sample(bullets);
    }

    if bullets.len() < MIN_SENTENCES && paragraphs.len() > 2 {
        return paragraphs
            .iter()
            .take(MAX_BULLETS)
            .map(|p| text::truncate_chars(p, MAX_PARAGRAPH_BULLET_CHARS))
            .collect();
    }

    bullets
}

/// Keep the first bullet and stride-sample the rest down to six more.
fn sample(bullets: Vec<String>) -> Vec<String> {
    let mut iter = bullets.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };
    let rest: Vec<String> = iter.collect();
    let slots = MAX_BULLETS - 1;
    let stride = rest.len().div_ceil(slots).max(1);

    std::iter::once(first)
        .chain(rest.into_iter().step_by(stride).take(slots))
        .collect()
}
