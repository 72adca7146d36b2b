//! Frequency-based keyword and key-phrase extraction.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Maximum number of keywords returned.
pub const MAX_KEYWORDS: usize = 7;

/// Tokens must be longer than this to count.
const MIN_TOKEN_LEN: usize = 3;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "although", "among", "an",
    "and", "another", "any", "are", "around", "as", "at", "be", "because", "been", "before",
    "being", "below", "between", "both", "but", "by", "can", "could", "did", "does", "doing",
    "down", "during", "each", "either", "else", "even", "ever", "every", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its", "itself",
    "just", "least", "less", "like", "made", "make", "many", "may", "me", "might", "more", "most",
    "much", "must", "my", "myself", "neither", "never", "no", "nor", "not", "now", "of", "off",
    "often", "on", "once", "only", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "perhaps", "quite", "rather", "really", "same", "several",
    "shall", "she", "should", "since", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "therefore", "these", "they", "this",
    "those", "though", "through", "thus", "to", "too", "under", "until", "up", "upon", "us",
    "used", "using", "very", "was", "we", "well", "were", "what", "whatever", "when", "whenever",
    "where", "whereas", "whether", "which", "while", "who", "whoever", "whole", "whom", "whose",
    "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\b\w+\b").unwrap();
    static ref STOPWORD_SET: HashSet<&'static str> = STOPWORDS.iter().copied().collect();
}

/// Frequency table that remembers first-seen order.
#[derive(Default)]
struct Counts {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl Counts {
    fn add(&mut self, term: String) {
        match self.counts.get_mut(&term) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(term.clone(), 1);
                self.order.push(term);
            }
        }
    }

    fn into_ranked(self) -> impl Iterator<Item = (String, usize)> {
        let counts = self.counts;
        self.order.into_iter().map(move |t| {
            let n = counts[&t];
            (t, n)
        })
    }
}

fn qualifies(token: &str) -> bool {
    token.chars().count() > MIN_TOKEN_LEN && !STOPWORD_SET.contains(token)
}

/// Extract up to seven title-cased keywords or phrases from `source`.
///
/// Single words and two/three-word phrases of adjacent qualifying words are
/// ranked together by frequency. Ties keep first-seen order, single words
/// before phrases. A candidate sharing any word with an already chosen one is
/// skipped.
pub fn extract_keywords(source: &str) -> Vec<String> {
    let lower = source.to_lowercase();
    let tokens: Vec<&str> = WORD.find_iter(&lower).map(|m| m.as_str()).collect();

    let mut unigrams = Counts::default();
    let mut phrases = Counts::default();

    for (i, token) in tokens.iter().enumerate() {
        if !qualifies(token) {
            continue;
        }
        unigrams.add(token.to_string());

        if let Some(next) = tokens.get(i + 1).filter(|t| qualifies(t)) {
            phrases.add(format!("{} {}", token, next));

            if let Some(third) = tokens.get(i + 2).filter(|t| qualifies(t)) {
                phrases.add(format!("{} {} {}", token, next, third));
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = unigrams
        .into_ranked()
        .chain(phrases.into_ranked())
        .collect();
    // Stable: equal counts keep insertion order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut used_words: HashSet<String> = HashSet::new();
    let mut selected = Vec::new();

    for (term, _) in ranked {
        if selected.len() >= MAX_KEYWORDS {
            break;
        }
        if term.split(' ').any(|w| used_words.contains(w)) {
            continue;
        }
        used_words.extend(term.split(' ').map(str::to_string));
        selected.push(term);
    }

    selected.into_iter().map(|t| title_case(&t)).collect()
}

fn title_case(term: &str) -> String {
    term.split(' ')
        .map(super::text::capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}
