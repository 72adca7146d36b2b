//! Local heuristic summarisation.
//!
//! Pure, single-pass text functions used when no AI credential is configured,
//! or when an AI call for one field fails. None of them can fail: empty or
//! unmatched input degrades to an empty or default result.

pub mod bullets;
pub mod chapters;
pub mod keywords;
pub mod paragraphs;
pub mod sentiment;
pub mod text;
pub mod topics;

pub use bullets::{extract_bullet_points, MAX_BULLETS};
pub use chapters::segment_chapters;
pub use keywords::{extract_keywords, MAX_KEYWORDS};
pub use paragraphs::select_paragraphs;
pub use sentiment::{classify_sentiment, SENTIMENT_THRESHOLD};
pub use topics::{detect_topics, GENERAL_TOPIC, MAX_TOPICS};
