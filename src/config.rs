//! Configuration loading and management for omnisumma.
//!
//! Loads settings from `omnisumma.toml` with environment variable overrides for sensitive data.

use crate::options::SummarizationOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name looked up in the current and config directories.
const CONFIG_FILE: &str = "omnisumma.toml";

/// Environment variable overriding the configured API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// AI service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Chat model identifier (e.g., "gpt-3.5-turbo")
    pub model: String,
    /// Base URL of the OpenAI-compatible API
    pub endpoint: String,
    /// System persona prefixed to the summary prompt
    pub persona: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub openai_key: Option<String>,
}

/// Storage paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base path for data storage
    pub path: PathBuf,
}

/// Text extraction settings, fixed for the life of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Whether audio and video may be sent for transcription
    pub transcription: bool,
    /// Largest accepted input file, in bytes
    pub max_file_size: u64,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Options used when the command line does not override them
    #[serde(default)]
    pub defaults: SummarizationOptions,
}

impl Config {
    /// Load configuration from the default location (omnisumma.toml in cwd or home).
    ///
    /// A missing file is not an error: built-in defaults are used.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                let mut config = Config::default();
                config.apply_env();
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Override API keys from environment variables
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api.openai_key = Some(key.trim().to_string());
            }
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("omnisumma")
            .join(CONFIG_FILE);
        home_config.exists().then_some(home_config)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            endpoint: "https://api.openai.com/v1".to_string(),
            persona: "You are an expert summarizer.".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data"),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            transcription: false,
            max_file_size: 10 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LengthType;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [agent]
            model = "gpt-4o-mini"

            [defaults]
            lengthType = "long"
            includeSentiment = true
            "#,
        )
        .unwrap();

        assert_eq!(config.agent.model, "gpt-4o-mini");
        assert_eq!(config.agent.endpoint, "https://api.openai.com/v1");
        assert_eq!(config.storage.path, PathBuf::from("./data"));
        assert!(!config.extraction.transcription);
        assert_eq!(config.extraction.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.defaults.length_type, LengthType::Long);
        assert!(config.defaults.include_sentiment);
        assert!(config.defaults.bullet_points);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let result: Result<Config, _> = toml::from_str("[agent\nmodel = ");
        assert!(result.is_err());
    }
}
