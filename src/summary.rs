//! Summary types - the structured output of a summarisation request.

use crate::source::SourceKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Words per minute used for document reading time.
const READING_WPM: usize = 200;
/// Words per minute used for spoken audio and video.
const SPEAKING_WPM: usize = 150;

/// Overall tone of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

impl FromStr for Sentiment {
    type Err = String;

    /// Accepts the label case-insensitively, ignoring surrounding punctuation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s
            .trim()
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        match word.as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(format!("unknown sentiment: {}", s.trim())),
        }
    }
}

/// A titled section of the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub content: String,
}

impl Chapter {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// The summary fields, each filled only when its option flag was set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary: String,
    pub bullet_points: Vec<String>,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapters: Option<Vec<Chapter>>,
}

/// A summary together with what it was made from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub title: String,
    pub source_type: SourceKind,
    pub reading_time: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: SummaryResult,
}

impl SummaryReport {
    /// Assemble a report for `file_name`, timing it against the extracted `text`.
    pub fn new(file_name: &str, kind: SourceKind, text: &str, result: SummaryResult) -> Self {
        Self {
            title: title_from_file_name(file_name),
            source_type: kind,
            reading_time: reading_time(kind, text),
            created_at: Utc::now(),
            result,
        }
    }

    /// Plain-text rendering used for export.
    pub fn to_text(&self) -> String {
        let result = &self.result;
        let mut out = format!("# {}\n\n## Summary\n{}\n", self.title, result.summary);

        if !result.bullet_points.is_empty() {
            out.push_str("\n## Key Points\n");
            for point in &result.bullet_points {
                out.push_str(&format!("- {}\n", point));
            }
        }

        if !result.keywords.is_empty() {
            out.push_str(&format!("\n## Keywords\n{}\n", result.keywords.join(", ")));
        }

        if let Some(topics) = &result.topics {
            out.push_str(&format!("\n## Topics\n{}\n", topics.join(", ")));
        }

        if let Some(chapters) = &result.chapters {
            out.push_str("\n## Chapters\n");
            for chapter in chapters {
                out.push_str(&format!("\n### {}\n{}\n", chapter.title, chapter.content));
            }
        }

        out.push_str(&format!("\nReading time: {}\n", self.reading_time));
        if let Some(sentiment) = result.sentiment {
            out.push_str(&format!("Sentiment: {}\n", sentiment));
        }
        out.push_str(&format!(
            "Generated on: {}",
            self.created_at.format("%Y-%m-%d %H:%M")
        ));
        out
    }

    /// File name for the text export, e.g. `my_report_summary.txt`.
    pub fn export_file_name(&self) -> String {
        let stem: String = self
            .title
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}_summary.txt", stem)
    }
}

/// Display title for a file: extension dropped, underscores as spaces, capitalised.
pub fn title_from_file_name(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };
    crate::heuristics::text::capitalize(&stem.replace('_', " "))
}

/// Estimated time to read (documents) or listen to (audio, video) `text`.
pub fn reading_time(kind: SourceKind, text: &str) -> String {
    let words = text.split_whitespace().count();
    let (wpm, unit) = match kind {
        SourceKind::Document => (READING_WPM, "read"),
        SourceKind::Audio => (SPEAKING_WPM, "audio"),
        SourceKind::Video => (SPEAKING_WPM, "video"),
    };
    let minutes = words.div_ceil(wpm).max(1);
    format!("{} min {}", minutes, unit)
}
