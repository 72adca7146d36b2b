//! Topic detection by category keyword matching.

use super::text::word_matcher;
use lazy_static::lazy_static;
use regex::Regex;

/// Returned when no category keyword appears at all.
pub const GENERAL_TOPIC: &str = "General";

/// Maximum number of topics returned.
pub const MAX_TOPICS: usize = 3;

/// Category labels in tie-break order.
const CATEGORIES: [&str; 8] = [
    "Technology",
    "Business",
    "Health",
    "Science",
    "Education",
    "Politics",
    "Environment",
    "Arts & Culture",
];

/// Keyword to category index into `CATEGORIES`.
const TOPIC_KEYWORDS: [(&str, usize); 37] = [
    ("technology", 0),
    ("software", 0),
    ("computer", 0),
    ("digital", 0),
    ("internet", 0),
    ("algorithm", 0),
    ("business", 1),
    ("market", 1),
    ("company", 1),
    ("revenue", 1),
    ("investment", 1),
    ("health", 2),
    ("medical", 2),
    ("disease", 2),
    ("patient", 2),
    ("treatment", 2),
    ("science", 3),
    ("research", 3),
    ("experiment", 3),
    ("physics", 3),
    ("biology", 3),
    ("education", 4),
    ("school", 4),
    ("student", 4),
    ("university", 4),
    ("teaching", 4),
    ("government", 5),
    ("policy", 5),
    ("election", 5),
    ("political", 5),
    ("climate", 6),
    ("environment", 6),
    ("pollution", 6),
    ("sustainability", 6),
    ("music", 7),
    ("film", 7),
    ("culture", 7),
];

lazy_static! {
    static ref MATCHERS: Vec<(Regex, usize)> = TOPIC_KEYWORDS
        .iter()
        .map(|(word, category)| (word_matcher(word), *category))
        .collect();
}

/// Detect up to three topic categories in `source`, most frequent first.
pub fn detect_topics(source: &str) -> Vec<String> {
    let mut totals = [0usize; CATEGORIES.len()];
    for (re, category) in MATCHERS.iter() {
        totals[*category] += re.find_iter(source).count();
    }

    let mut ranked: Vec<(usize, usize)> = totals
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, total)| *total > 0)
        .collect();

    if ranked.is_empty() {
        return vec![GENERAL_TOPIC.to_string()];
    }

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(MAX_TOPICS)
        .map(|(category, _)| CATEGORIES[category].to_string())
        .collect()
}
