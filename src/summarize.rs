//! Summarisation request handling.
//!
//! A request runs each enabled result field as its own call against a
//! [`SummaryBackend`]. The calls run concurrently and fail independently: a
//! field whose call fails is recomputed with the local heuristic for that
//! field alone.

use crate::agent::{AgentError, OpenAiAgent};
use crate::config::Config;
use crate::heuristics;
use crate::options::SummarizationOptions;
use crate::source::{ExtractError, Extractor, SourceText, Transcribe};
use crate::summary::{Chapter, Sentiment, SummaryReport, SummaryResult};
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("failed to extract text: {0}")]
    ExtractError(#[from] ExtractError),
    #[error("failed to set up AI client: {0}")]
    AgentError(#[from] AgentError),
}

/// Something that can produce each summary field from source text.
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn summary(
        &self,
        text: &str,
        options: &SummarizationOptions,
    ) -> Result<String, AgentError>;

    async fn bullet_points(&self, text: &str) -> Result<Vec<String>, AgentError>;

    async fn keywords(&self, text: &str) -> Result<Vec<String>, AgentError>;

    async fn sentiment(&self, text: &str) -> Result<Sentiment, AgentError>;

    async fn topics(&self, text: &str) -> Result<Vec<String>, AgentError>;

    async fn chapters(&self, text: &str) -> Result<Vec<Chapter>, AgentError>;
}

/// The local heuristics as a backend. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalHeuristics;

#[async_trait]
impl SummaryBackend for LocalHeuristics {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn summary(
        &self,
        text: &str,
        options: &SummarizationOptions,
    ) -> Result<String, AgentError> {
        Ok(heuristics::select_paragraphs(
            text,
            options.length_type.retention(),
        ))
    }

    async fn bullet_points(&self, text: &str) -> Result<Vec<String>, AgentError> {
        Ok(heuristics::extract_bullet_points(text))
    }

    async fn keywords(&self, text: &str) -> Result<Vec<String>, AgentError> {
        Ok(heuristics::extract_keywords(text))
    }

    async fn sentiment(&self, text: &str) -> Result<Sentiment, AgentError> {
        Ok(heuristics::classify_sentiment(text))
    }

    async fn topics(&self, text: &str) -> Result<Vec<String>, AgentError> {
        Ok(heuristics::detect_topics(text))
    }

    async fn chapters(&self, text: &str) -> Result<Vec<Chapter>, AgentError> {
        Ok(heuristics::segment_chapters(text))
    }
}

/// Run a field call only when its flag is set.
async fn when<T, F>(enabled: bool, call: F) -> Option<Result<T, AgentError>>
where
    F: std::future::Future<Output = Result<T, AgentError>>,
{
    if enabled {
        Some(call.await)
    } else {
        None
    }
}

/// Keep a successful value, or log the failure and use the local fallback.
fn or_fallback<T>(
    field: &str,
    backend: &str,
    outcome: Result<T, AgentError>,
    fallback: impl FnOnce() -> T,
) -> T {
    match outcome {
        Ok(value) => value,
        Err(e) => {
            warn!(field, backend, error = %e, "field failed, using local heuristic");
            fallback()
        }
    }
}

/// Produce every requested field for `text` using `backend`.
pub async fn summarize_text(
    backend: &dyn SummaryBackend,
    text: &str,
    options: &SummarizationOptions,
) -> SummaryResult {
    let name = backend.name();
    info!(backend = name, length = %options.length_type, "summarising");

    let (summary, bullet_points, keywords, sentiment, topics, chapters) = tokio::join!(
        backend.summary(text, options),
        when(options.bullet_points, backend.bullet_points(text)),
        when(options.extract_keywords, backend.keywords(text)),
        when(options.include_sentiment, backend.sentiment(text)),
        when(options.topic_detection, backend.topics(text)),
        when(options.chapter_summarization, backend.chapters(text)),
    );

    SummaryResult {
        summary: or_fallback("summary", name, summary, || {
            heuristics::select_paragraphs(text, options.length_type.retention())
        }),
        bullet_points: bullet_points
            .map(|r| {
                or_fallback("bulletPoints", name, r, || {
                    heuristics::extract_bullet_points(text)
                })
            })
            .unwrap_or_default(),
        keywords: keywords
            .map(|r| or_fallback("keywords", name, r, || heuristics::extract_keywords(text)))
            .unwrap_or_default(),
        sentiment: sentiment
            .map(|r| or_fallback("sentiment", name, r, || heuristics::classify_sentiment(text))),
        topics: topics.map(|r| or_fallback("topics", name, r, || heuristics::detect_topics(text))),
        chapters: chapters
            .map(|r| or_fallback("chapters", name, r, || heuristics::segment_chapters(text))),
    }
}

/// Ties extraction, backend choice and report assembly together.
pub struct Summarizer {
    extractor: Extractor,
    agent: Option<OpenAiAgent>,
}

impl Summarizer {
    /// Build from configuration. With no API key every request is local.
    pub fn new(config: &Config, api_key: Option<String>) -> Result<Self, SummarizeError> {
        let agent = match api_key {
            Some(key) => Some(OpenAiAgent::new(key, &config.agent)?),
            None => None,
        };
        Ok(Self {
            extractor: Extractor::new(config.extraction.clone()),
            agent,
        })
    }

    /// Whether requests will go to the AI service.
    pub fn has_agent(&self) -> bool {
        self.agent.is_some()
    }

    /// Extract the text of `path`.
    pub async fn extract(&self, path: &Path) -> Result<SourceText, SummarizeError> {
        let transcriber = self.agent.as_ref().map(|a| a as &dyn Transcribe);
        Ok(self.extractor.extract(path, transcriber).await?)
    }

    /// Summarise already extracted text. `local` forces the heuristics.
    pub async fn summarize_source(
        &self,
        source: &SourceText,
        options: &SummarizationOptions,
        local: bool,
    ) -> SummaryReport {
        let backend: &dyn SummaryBackend = match &self.agent {
            Some(agent) if !local => agent,
            _ => &LocalHeuristics,
        };
        let result = summarize_text(backend, &source.text, options).await;
        SummaryReport::new(&source.file_name, source.kind, &source.text, result)
    }

    /// Extract and summarise `path`.
    pub async fn summarize_file(
        &self,
        path: &Path,
        options: &SummarizationOptions,
        local: bool,
    ) -> Result<SummaryReport, SummarizeError> {
        let source = self.extract(path).await?;
        Ok(self.summarize_source(&source, options, local).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Solar power is a great success story. Costs fell quickly.\n\n\
                        Storage remains the key problem for the grid. Batteries help.\n\n\
                        In conclusion, climate policy should support storage research.";

    #[tokio::test]
    async fn test_only_requested_fields() {
        let options = SummarizationOptions {
            bullet_points: false,
            extract_keywords: false,
            ..Default::default()
        };
        let result = summarize_text(&LocalHeuristics, TEXT, &options).await;
        assert!(!result.summary.is_empty());
        assert!(result.bullet_points.is_empty());
        assert!(result.keywords.is_empty());
        assert!(result.sentiment.is_none());
        assert!(result.topics.is_none());
        assert!(result.chapters.is_none());
    }

    #[tokio::test]
    async fn test_all_fields_local() {
        let options = SummarizationOptions {
            include_sentiment: true,
            topic_detection: true,
            chapter_summarization: true,
            ..Default::default()
        };
        let result = summarize_text(&LocalHeuristics, TEXT, &options).await;
        assert_eq!(result.summary, heuristics::select_paragraphs(TEXT, 0.6));
        assert_eq!(result.bullet_points, heuristics::extract_bullet_points(TEXT));
        assert_eq!(result.keywords, heuristics::extract_keywords(TEXT));
        assert_eq!(result.sentiment, Some(heuristics::classify_sentiment(TEXT)));
        assert_eq!(result.topics, Some(heuristics::detect_topics(TEXT)));
        assert_eq!(result.chapters.map(|c| c.len()), Some(2));
    }
}
