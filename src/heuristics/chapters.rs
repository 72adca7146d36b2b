//! Chapter segmentation by paragraph chunking.

use super::text;
use crate::summary::Chapter;

/// Longest chapter title (before the "Chapter N: " prefix) kept intact.
const MAX_TITLE_CHARS: usize = 40;

/// Split `source` into two to four chapters of contiguous paragraphs.
///
/// Text with at most one paragraph becomes a single chapter titled "Summary".
pub fn segment_chapters(source: &str) -> Vec<Chapter> {
    let paragraphs = text::paragraphs(source);

    if paragraphs.len() <= 1 {
        let content = paragraphs.first().copied().unwrap_or(source);
        return vec![Chapter::new("Summary", content)];
    }

    let count = paragraphs.len();
    let chapter_count = match count {
        0..=3 => 2,
        4..=6 => 3,
        _ => 4,
    };
    let chapter_size = count.div_ceil(chapter_count);

    paragraphs
        .chunks(chapter_size)
        .enumerate()
        .map(|(index, group)| {
            let title = format!("Chapter {}: {}", index + 1, chapter_title(group[0]));
            Chapter::new(title, group.join("\n\n"))
        })
        .collect()
}

/// Title from the first sentence of a paragraph: letters, digits and whitespace only.
///
/// Inner whitespace is kept as written.
fn chapter_title(paragraph: &str) -> String {
    let cleaned: String = text::first_sentence(paragraph)
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    text::capitalize(&text::truncate_chars(cleaned.trim(), MAX_TITLE_CHARS))
}
