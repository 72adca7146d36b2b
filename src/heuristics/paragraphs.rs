//! Paragraph selection: a shortened version of the source text.

use super::text;
use lazy_static::lazy_static;
use regex::Regex;

/// Paragraphs containing any of these are preferred once the stride walk is done.
const MARKERS: [&str; 5] = ["conclusion", "summary", "therefore", "result", "important"];

lazy_static! {
    static ref MARKER: Regex = text::any_word_matcher(&MARKERS);
}

/// Keep roughly `retention` of the paragraphs of `source`.
///
/// `retention` is clamped to `0.0..=1.0`.
///
/// Paragraph 0 is always kept. The rest are picked at an even stride, then
/// any paragraph mentioning a marker word is added while room remains.
/// Selected paragraphs keep their original order and are rejoined with blank
/// lines.
pub fn select_paragraphs(source: &str, retention: f64) -> String {
    let paragraphs = text::paragraphs(source);
    let count = paragraphs.len();
    if count == 0 {
        return String::new();
    }

    let percent = (retention.clamp(0.0, 1.0) * 100.0).round() as usize;
    let max_paragraphs = (count * percent / 100).clamp(1, count);
    let stride = (count / max_paragraphs).max(1);

    let mut selected = vec![false; count];
    selected[0] = true;
    let mut taken = 1;

    for index in (0..count).step_by(stride) {
        if taken >= max_paragraphs {
            break;
        }
        if !selected[index] {
            selected[index] = true;
            taken += 1;
        }
    }

    for (index, paragraph) in paragraphs.iter().enumerate() {
        if taken >= max_paragraphs {
            break;
        }
        if selected[index] {
            continue;
        }
        if mentions_marker(paragraph) {
            selected[index] = true;
            taken += 1;
        }
    }

    paragraphs
        .iter()
        .zip(selected)
        .filter_map(|(p, keep)| keep.then_some(*p))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Whether `paragraph` contains a marker word as a whole word.
fn mentions_marker(paragraph: &str) -> bool {
    MARKER.is_match(paragraph)
}
