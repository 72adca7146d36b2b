//! Source classification and text extraction.
//!
//! Documents are read locally (plain text, PDF, DOCX, PPTX). Audio and video
//! go through a [`Transcribe`] implementation, but only when transcription was
//! enabled in the configuration at startup.

use crate::agent::AgentError;
use crate::config::ExtractionConfig;
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("file is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
    #[error("failed to extract PDF text: {0}")]
    PdfError(String),
    #[error("failed to open document container: {0}")]
    ZipError(#[from] zip::result::ZipError),
    #[error("malformed document XML: {0}")]
    XmlError(String),
    #[error("transcription is not available: {0}")]
    TranscriptionUnavailable(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(#[from] AgentError),
    #[error("extraction task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
    #[error("no text content found in {0}")]
    NoContent(String),
}

/// What kind of media a source file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Document,
    Audio,
    Video,
}

impl SourceKind {
    /// Classify by file extension. Unknown extensions are treated as documents.
    pub fn classify(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "mp3" | "wav" | "ogg" | "m4a" => SourceKind::Audio,
            "mp4" | "mov" | "avi" | "webm" => SourceKind::Video,
            _ => SourceKind::Document,
        }
    }

    pub fn is_media(self) -> bool {
        matches!(self, SourceKind::Audio | SourceKind::Video)
    }
}

/// Speech-to-text for audio and video sources.
#[async_trait]
pub trait Transcribe: Send + Sync {
    async fn transcribe(&self, path: &Path) -> Result<String, AgentError>;
}

/// Extracted text along with where it came from.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub file_name: String,
    pub kind: SourceKind,
    pub text: String,
}

/// Turns files into text.
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract the text of `path`.
    ///
    /// `transcriber` is only consulted for audio and video, and only when
    /// transcription is enabled.
    pub async fn extract(
        &self,
        path: &Path,
        transcriber: Option<&dyn Transcribe>,
    ) -> Result<SourceText, ExtractError> {
        let size = tokio::fs::metadata(path).await?.len();
        if size > self.config.max_file_size {
            return Err(ExtractError::TooLarge {
                size,
                limit: self.config.max_file_size,
            });
        }

        let kind = SourceKind::classify(path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(file = %file_name, ?kind, size, "extracting source text");

        let text = if kind.is_media() {
            if !self.config.transcription {
                return Err(ExtractError::TranscriptionUnavailable(
                    "transcription is disabled in the configuration".to_string(),
                ));
            }
            let transcriber = transcriber.ok_or_else(|| {
                ExtractError::TranscriptionUnavailable("no API key configured".to_string())
            })?;
            transcriber.transcribe(path).await?
        } else {
            let owned: PathBuf = path.to_path_buf();
            tokio::task::spawn_blocking(move || read_document(&owned)).await??
        };

        if text.trim().is_empty() {
            return Err(ExtractError::NoContent(file_name));
        }
        debug!(chars = text.len(), "extracted text");

        Ok(SourceText {
            file_name,
            kind,
            text,
        })
    }
}

/// Read a document synchronously, dispatching on extension.
pub fn read_document(path: &Path) -> Result<String, ExtractError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => pdf_extract::extract_text(path).map_err(|e| ExtractError::PdfError(e.to_string())),
        "docx" => read_docx(path),
        "pptx" => read_pptx(path),
        _ => {
            let bytes = std::fs::read(path)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn read_docx(path: &Path) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;
    let mut xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;
    Ok(xml_paragraphs(&xml, b"p", b"t")?.join("\n\n"))
}

fn read_pptx(path: &Path) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    slides.sort();

    let mut paragraphs = Vec::new();
    for (_, name) in slides {
        let mut xml = String::new();
        archive.by_name(&name)?.read_to_string(&mut xml)?;
        paragraphs.extend(xml_paragraphs(&xml, b"p", b"t")?);
    }
    Ok(paragraphs.join("\n\n"))
}

/// Collect the text runs of an Office XML part, one string per paragraph.
///
/// Matching is on local names, so `w:p`/`w:t` (Word) and `a:p`/`a:t`
/// (PowerPoint) are both handled by `b"p"`/`b"t"`.
fn xml_paragraphs(
    xml: &str,
    paragraph_tag: &[u8],
    text_tag: &[u8],
) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractError::XmlError(e.to_string()))?;
        match event {
            Event::Start(e) if e.local_name().as_ref() == text_tag => in_text = true,
            Event::End(e) if e.local_name().as_ref() == text_tag => in_text = false,
            Event::End(e) if e.local_name().as_ref() == paragraph_tag => {
                let paragraph = current.trim();
                if !paragraph.is_empty() {
                    paragraphs.push(paragraph.to_string());
                }
                current.clear();
            }
            Event::Empty(e) if e.local_name().as_ref() == b"tab" => current.push(' '),
            Event::Text(t) if in_text => {
                let text = t
                    .decode()
                    .map_err(|e| ExtractError::XmlError(e.to_string()))?;
                current.push_str(&text);
            }
            Event::GeneralRef(r) if in_text => {
                let name = r
                    .decode()
                    .map_err(|e| ExtractError::XmlError(e.to_string()))?;
                if let Some(c) = resolve_entity(&name) {
                    current.push(c);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
