//! Summarisation options chosen per request.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How long the summary should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LengthType {
    Short,
    #[default]
    Medium,
    Long,
}

impl LengthType {
    /// Fraction of paragraphs kept by the local paragraph selector.
    pub fn retention(self) -> f64 {
        match self {
            LengthType::Short => 0.3,
            LengthType::Medium => 0.6,
            LengthType::Long => 0.9,
        }
    }

    /// Completion token budget for the AI summary.
    pub fn max_tokens(self) -> u32 {
        match self {
            LengthType::Short => 200,
            LengthType::Medium => 400,
            LengthType::Long => 800,
        }
    }

    /// Prompt instruction for the AI summary.
    pub fn instruction(self) -> &'static str {
        match self {
            LengthType::Short => {
                "Create a very concise summary, focusing only on the most important information."
            }
            LengthType::Medium => {
                "Create a balanced summary that covers the main points without too much detail."
            }
            LengthType::Long => {
                "Create a comprehensive summary that covers the main points and includes supporting details."
            }
        }
    }
}

/// Summarisation style. Only the AI path honours it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryType {
    Abstractive,
    Extractive,
    #[default]
    Hybrid,
}

impl SummaryType {
    /// Prompt instruction for the AI summary.
    pub fn instruction(self) -> &'static str {
        match self {
            SummaryType::Extractive => "Use direct quotes and phrases from the original text.",
            SummaryType::Abstractive => {
                "Rephrase the content in your own words, focusing on the meaning."
            }
            SummaryType::Hybrid => "Use a mix of direct quotes and rephrasing, as appropriate.",
        }
    }
}

impl fmt::Display for LengthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LengthType::Short => "short",
            LengthType::Medium => "medium",
            LengthType::Long => "long",
        };
        f.write_str(s)
    }
}

/// Options for a single summarisation request.
///
/// Each optional result field is only produced when its flag is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummarizationOptions {
    pub length_type: LengthType,
    pub bullet_points: bool,
    pub extract_keywords: bool,
    pub include_sentiment: bool,
    pub topic_detection: bool,
    pub chapter_summarization: bool,
    pub summary_type: SummaryType,
    /// Output language. Only the AI path honours it.
    pub language: String,
}

impl Default for SummarizationOptions {
    fn default() -> Self {
        Self {
            length_type: LengthType::Medium,
            bullet_points: true,
            extract_keywords: true,
            include_sentiment: false,
            topic_detection: false,
            chapter_summarization: false,
            summary_type: SummaryType::Hybrid,
            language: "english".to_string(),
        }
    }
}

impl SummarizationOptions {
    /// Whether the output language differs from the source default.
    pub fn wants_translation(&self) -> bool {
        !self.language.trim().eq_ignore_ascii_case("english")
    }
}
