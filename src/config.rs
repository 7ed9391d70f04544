//! JSON description of a transcript: which hash to use and which challenges,
//! in protocol order, it derives.
//!
//! ```json
//! {"hash": "SHA256", "challenges": ["gamma", "beta", "alpha", "zeta"]}
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::TranscriptError;
use crate::hash::{HashId, TranscriptHash};
use crate::transcript::Transcript;

/// Serializable transcript layout shared by prover and verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptConfig {
    /// Hash capability used for every challenge.
    pub hash: HashId,
    /// Challenge names in protocol order.
    pub challenges: Vec<String>,
}

/// Errors surfaced while loading or instantiating a [`TranscriptConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    /// File-system failure while reading the config.
    Io(String),
    #[error("config parse error: {0}")]
    /// The config is not valid JSON or does not match the schema.
    Parse(String),
    #[error(transparent)]
    /// The declared challenges are not a valid transcript.
    Transcript(#[from] TranscriptError),
}

impl TranscriptConfig {
    /// Creates a config from a hash identifier and challenge names.
    pub fn new<I, S>(hash: HashId, challenges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hash,
            challenges: challenges.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a config from a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(input).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// Serializes the config to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Builds a fresh transcript, rejecting duplicate challenge names.
    pub fn build(&self) -> Result<Transcript<Box<dyn TranscriptHash>>, ConfigError> {
        let transcript = Transcript::try_new(self.hash.hasher(), self.challenges.iter().cloned())?;
        Ok(transcript)
    }
}
