//! # OmniSumma
//!
//! Summarise documents, audio and video into structured summaries.
//!
//! ## Features
//!
//! - **AI summaries**: OpenAI chat completions for prose, bullet points, keywords,
//!   sentiment, topics and chapters, one request per field
//! - **Local fallback**: pure heuristics take over when no API key is set, or for
//!   any single field whose AI call fails
//! - **Many sources**: plain text, PDF, DOCX and PPTX, plus audio/video transcription
//!   when enabled

pub mod agent;
pub mod config;
pub mod credentials;
pub mod heuristics;
pub mod logging;
pub mod options;
pub mod source;
pub mod summarize;
pub mod summary;

pub use config::Config;
pub use credentials::CredentialStore;
pub use options::{LengthType, SummarizationOptions, SummaryType};
pub use source::{SourceKind, SourceText};
pub use summarize::{summarize_text, LocalHeuristics, SummaryBackend, Summarizer};
pub use summary::{Chapter, Sentiment, SummaryReport, SummaryResult};
