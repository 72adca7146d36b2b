//! Lexicon word-count sentiment classification.

use super::text::word_matcher;
use crate::summary::Sentiment;
use lazy_static::lazy_static;
use regex::Regex;

/// One side must outnumber the other by this factor to win.
pub const SENTIMENT_THRESHOLD: f64 = 1.5;

const POSITIVE_WORDS: [&str; 18] = [
    "good", "great", "excellent", "positive", "success", "successful", "benefit", "improve",
    "improved", "happy", "effective", "innovative", "promising", "advantage", "opportunity",
    "progress", "growth", "best",
];

const NEGATIVE_WORDS: [&str; 18] = [
    "bad", "poor", "negative", "failure", "failed", "problem", "difficult", "risk", "threat",
    "decline", "loss", "worst", "crisis", "concern", "damage", "harmful", "weak", "unfortunately",
];

lazy_static! {
    static ref POSITIVE: Vec<Regex> = POSITIVE_WORDS.iter().map(|w| word_matcher(w)).collect();
    static ref NEGATIVE: Vec<Regex> = NEGATIVE_WORDS.iter().map(|w| word_matcher(w)).collect();
}

fn count_matches(matchers: &[Regex], source: &str) -> usize {
    matchers.iter().map(|re| re.find_iter(source).count()).sum()
}

/// Classify `source` by comparing positive and negative lexicon hits.
pub fn classify_sentiment(source: &str) -> Sentiment {
    let positive = count_matches(&POSITIVE, source) as f64;
    let negative = count_matches(&NEGATIVE, source) as f64;

    if positive > SENTIMENT_THRESHOLD * negative {
        Sentiment::Positive
    } else if negative > SENTIMENT_THRESHOLD * positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
