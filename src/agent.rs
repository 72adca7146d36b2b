//! LLM agent module for AI summarisation.
//!
//! Talks to the OpenAI chat-completions and audio-transcription endpoints over
//! reqwest. Every result field is a separate request so each can fail alone.

use crate::config::AgentConfig;
use crate::options::SummarizationOptions;
use crate::source::Transcribe;
use crate::summarize::SummaryBackend;
use crate::summary::{Chapter, Sentiment};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("omnisumma/", env!("CARGO_PKG_VERSION"));

/// Speech-to-text model used for audio and video.
const TRANSCRIPTION_MODEL: &str = "whisper-1";

const KEYWORDS_PROMPT: &str = "Extract 5-7 important keywords or phrases from the text. \
     Return ONLY a comma-separated list of keywords, nothing else.";
const SENTIMENT_PROMPT: &str = "Analyze the sentiment of the text and respond with ONLY one word: \
     Positive, Negative, or Neutral.";
const TOPICS_PROMPT: &str = "Identify 3-5 main topics or themes in the text. \
     Return ONLY a comma-separated list of topics, nothing else.";
const CHAPTERS_PROMPT: &str = "Divide the text into 2-4 logical chapters or sections. \
     For each section, provide a title and a summary. \
     Format your response as a JSON array with objects containing 'title' and 'content' properties. \
     Example: [{\"title\": \"Introduction\", \"content\": \"Summary of introduction...\"}, {...}]";
const BULLETS_PROMPT: &str = "Extract 5-7 key points from the text as bullet points. \
     Return ONLY a JSON array of strings, with each string being a bullet point. \
     Example: [\"First key point\", \"Second key point\", ...]";

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("response contained no choices")]
    EmptyResponse,
    #[error("failed to read media file: {0}")]
    MediaError(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Client for the OpenAI API.
pub struct OpenAiAgent {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    persona: String,
}

impl OpenAiAgent {
    /// Build an agent authenticating with `api_key`.
    pub fn new(api_key: impl Into<String>, config: &AgentConfig) -> Result<Self, AgentError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            persona: config.persona.clone(),
        })
    }

    /// Send a single system + user exchange and return the reply text.
    async fn chat(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, AgentError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens,
            temperature,
        };

        debug!(model = %self.model, max_tokens, "sending chat completion");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let body: ChatResponse = read_json(response).await?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(AgentError::EmptyResponse)
    }
}

/// Decode a JSON body, turning non-success statuses into [`AgentError::ApiError`].
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AgentError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
        warn!(status = status.as_u16(), %message, "OpenAI API error");
        return Err(AgentError::ApiError {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl SummaryBackend for OpenAiAgent {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn summary(
        &self,
        text: &str,
        options: &SummarizationOptions,
    ) -> Result<String, AgentError> {
        let system = system_prompt(&self.persona, options);
        let user = format!("Please summarize the following content:\n\n{}", text);
        self.chat(&system, &user, options.length_type.max_tokens(), 0.5)
            .await
    }

    async fn bullet_points(&self, text: &str) -> Result<Vec<String>, AgentError> {
        let reply = self.chat(BULLETS_PROMPT, text, 350, 0.3).await?;
        parse_json_array(&reply)
    }

    async fn keywords(&self, text: &str) -> Result<Vec<String>, AgentError> {
        let reply = self.chat(KEYWORDS_PROMPT, text, 100, 0.3).await?;
        Ok(parse_comma_list(&reply))
    }

    async fn sentiment(&self, text: &str) -> Result<Sentiment, AgentError> {
        let reply = self.chat(SENTIMENT_PROMPT, text, 10, 0.3).await?;
        reply.parse().map_err(AgentError::ParseError)
    }

    async fn topics(&self, text: &str) -> Result<Vec<String>, AgentError> {
        let reply = self.chat(TOPICS_PROMPT, text, 100, 0.3).await?;
        Ok(parse_comma_list(&reply))
    }

    async fn chapters(&self, text: &str) -> Result<Vec<Chapter>, AgentError> {
        let reply = self.chat(CHAPTERS_PROMPT, text, 500, 0.5).await?;
        parse_json_array(&reply)
    }
}

#[async_trait]
impl Transcribe for OpenAiAgent {
    async fn transcribe(&self, path: &Path) -> Result<String, AgentError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "media".to_string());

        debug!(file = %file_name, bytes = bytes.len(), "uploading for transcription");
        let form = Form::new()
            .text("model", TRANSCRIPTION_MODEL)
            .part("file", Part::bytes(bytes).file_name(file_name));

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.endpoint))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let body: TranscriptionResponse = read_json(response).await?;
        Ok(body.text)
    }
}

/// Compose the summary system prompt from the persona and options.
pub fn system_prompt(persona: &str, options: &SummarizationOptions) -> String {
    let mut prompt = format!(
        "{} {} {}",
        persona.trim(),
        options.length_type.instruction(),
        options.summary_type.instruction()
    );
    if options.wants_translation() {
        prompt.push_str(&format!(" Write the summary in {}.", options.language.trim()));
    }
    prompt.push_str(
        "\nMaintain a professional, informative tone and structure the summary in \
         well-organized paragraphs.\nFocus on factual information and key insights.",
    );
    prompt
}

/// Split a comma-separated reply into trimmed, non-empty items.
pub fn parse_comma_list(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the outermost JSON array in a reply, ignoring code fences and prose.
pub fn parse_json_array<T: DeserializeOwned>(reply: &str) -> Result<Vec<T>, AgentError> {
    let cleaned = strip_markdown_json(reply);
    let candidate = match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => cleaned.as_str(),
    };
    serde_json::from_str(candidate)
        .map_err(|e| AgentError::ParseError(format!("{}: {}", e, candidate)))
}

/// Strip markdown code block wrappers from a JSON response
fn strip_markdown_json(text: &str) -> String {
    let trimmed = text.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        let without_prefix = rest.strip_prefix("json").unwrap_or(rest);
        if let Some(end_idx) = without_prefix.rfind("```") {
            return without_prefix[..end_idx].trim().to_string();
        }
    }

    trimmed.to_string()
}
