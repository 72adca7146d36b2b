//! Sled-based storage for the AI service credential.

use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Key under which the credential is stored.
const API_KEY: &str = "openai_api_key";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("database error: {0}")]
    DbError(#[from] sled::Error),
    #[error("stored credential is not valid UTF-8")]
    Corrupt,
    #[error("API key must not be empty")]
    Empty,
}

/// Persistent store for the OpenAI API key.
pub struct CredentialStore {
    db: sled::Db,
}

impl CredentialStore {
    /// Open or create the store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CredentialError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Save `key`, trimmed. Empty keys are rejected.
    pub fn set(&self, key: &str) -> Result<(), CredentialError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty);
        }
        self.db.insert(API_KEY, key.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    /// The saved key, if any.
    pub fn get(&self) -> Result<Option<String>, CredentialError> {
        match self.db.get(API_KEY)? {
            Some(data) => {
                let key =
                    String::from_utf8(data.to_vec()).map_err(|_| CredentialError::Corrupt)?;
                Ok(Some(key))
            }
            None => Ok(None),
        }
    }

    /// Remove the saved key. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, CredentialError> {
        let existed = self.db.remove(API_KEY)?.is_some();
        self.db.flush()?;
        Ok(existed)
    }
}

/// Pick the credential for a request: the configured one wins over the stored one.
///
/// An unreadable stored key is logged and treated as absent.
pub fn resolve_api_key(
    configured: Option<&str>,
    store: Option<&CredentialStore>,
) -> Option<String> {
    if let Some(key) = configured.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }
    match store?.get() {
        Ok(key) => key,
        Err(e) => {
            warn!(error = %e, "stored API key unreadable, using local heuristics");
            None
        }
    }
}

/// Show only the first 3 and last 4 characters of a key.
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 7 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
