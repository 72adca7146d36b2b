use async_trait::async_trait;
use omnisumma::agent::AgentError;
use omnisumma::config::Config;
use omnisumma::heuristics;
use omnisumma::{
    summarize_text, Chapter, LengthType, Sentiment, SourceKind, SummarizationOptions,
    SummaryBackend, Summarizer,
};
use std::io::Write;

const TEXT: &str = "Renewable energy costs have fallen sharply. Solar and wind now compete.\n\n\
                    Energy storage remains the main technical problem. Batteries are improving.\n\n\
                    Policy matters too. Carbon pricing and climate targets shape adoption.\n\n\
                    In conclusion, cooperation will accelerate the transition. The outlook is good.";

/// Fails every field except sentiment, which it answers itself.
struct FlakyBackend;

#[async_trait]
impl SummaryBackend for FlakyBackend {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn summary(
        &self,
        _text: &str,
        _options: &SummarizationOptions,
    ) -> Result<String, AgentError> {
        Err(AgentError::EmptyResponse)
    }

    async fn bullet_points(&self, _text: &str) -> Result<Vec<String>, AgentError> {
        Err(AgentError::ParseError("not a list".to_string()))
    }

    async fn keywords(&self, _text: &str) -> Result<Vec<String>, AgentError> {
        Ok(vec!["Remote".to_string()])
    }

    async fn sentiment(&self, _text: &str) -> Result<Sentiment, AgentError> {
        Ok(Sentiment::Negative)
    }

    async fn topics(&self, _text: &str) -> Result<Vec<String>, AgentError> {
        Err(AgentError::ApiError {
            status: 429,
            message: "rate limited".to_string(),
        })
    }

    async fn chapters(&self, _text: &str) -> Result<Vec<Chapter>, AgentError> {
        Ok(vec![Chapter::new("Remote", "From the service.")])
    }
}

fn all_fields() -> SummarizationOptions {
    SummarizationOptions {
        include_sentiment: true,
        topic_detection: true,
        chapter_summarization: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn failed_fields_fall_back_without_touching_others() {
    let result = summarize_text(&FlakyBackend, TEXT, &all_fields()).await;

    assert_eq!(result.summary, heuristics::select_paragraphs(TEXT, 0.6));
    assert_eq!(result.bullet_points, heuristics::extract_bullet_points(TEXT));
    assert_eq!(result.topics, Some(heuristics::detect_topics(TEXT)));

    assert_eq!(result.keywords, vec!["Remote"]);
    assert_eq!(result.sentiment, Some(Sentiment::Negative));
    assert_eq!(
        result.chapters,
        Some(vec![Chapter::new("Remote", "From the service.")])
    );
}

#[tokio::test]
async fn summarizer_without_key_is_local() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(TEXT.as_bytes()).unwrap();

    let summarizer = Summarizer::new(&Config::default(), None).unwrap();
    assert!(!summarizer.has_agent());

    let options = SummarizationOptions {
        length_type: LengthType::Short,
        ..all_fields()
    };
    let report = summarizer
        .summarize_file(file.path(), &options, false)
        .await
        .unwrap();

    assert_eq!(report.source_type, SourceKind::Document);
    assert_eq!(report.reading_time, "1 min read");
    assert_eq!(
        report.result.summary,
        "Renewable energy costs have fallen sharply. Solar and wind now compete."
    );
    assert_eq!(report.result.sentiment, Some(heuristics::classify_sentiment(TEXT)));
    // 4 paragraphs ask for 3 chapters of 2, which yields 2.
    assert_eq!(report.result.chapters.as_ref().map(Vec::len), Some(2));
    assert_eq!(
        report.result.topics,
        Some(vec!["Politics".to_string(), "Environment".to_string()])
    );
}

#[tokio::test]
async fn local_flag_skips_the_agent() {
    let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
    file.write_all(TEXT.as_bytes()).unwrap();

    // A key is set but the endpoint is never contacted because of `local`.
    let mut config = Config::default();
    config.agent.endpoint = "http://127.0.0.1:9".to_string();
    let summarizer = Summarizer::new(&config, Some("sk-test".to_string())).unwrap();
    assert!(summarizer.has_agent());

    let report = summarizer
        .summarize_file(file.path(), &SummarizationOptions::default(), true)
        .await
        .unwrap();
    assert_eq!(report.result.keywords, heuristics::extract_keywords(TEXT));
}

#[tokio::test]
async fn unreachable_service_falls_back_per_field() {
    let mut config = Config::default();
    config.agent.endpoint = "http://127.0.0.1:9".to_string();
    config.agent.timeout_secs = 5;
    let summarizer = Summarizer::new(&config, Some("sk-test".to_string())).unwrap();

    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(TEXT.as_bytes()).unwrap();

    let report = summarizer
        .summarize_file(file.path(), &all_fields(), false)
        .await
        .unwrap();
    assert_eq!(report.result.summary, heuristics::select_paragraphs(TEXT, 0.6));
    assert_eq!(report.result.keywords, heuristics::extract_keywords(TEXT));
    assert_eq!(report.result.chapters.map(|c| c.len()), Some(2));
}
