//! Errors raised while binding values to, or computing, transcript challenges.
//!
//! Every variant signals a misuse of the transcript protocol (or a failing
//! hash capability) rather than a transient condition, so none of them are
//! worth retrying.

use std::io;
use thiserror::Error;

/// Errors surfaced by [`Transcript`](crate::Transcript) operations.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("challenge `{0}` not recorded in the transcript")]
    /// The referenced challenge name was never declared.
    ChallengeNotFound(String),
    #[error("challenge `{0}` already computed, cannot be bound to other values")]
    /// A value was bound after the challenge digest had been finalised.
    ChallengeAlreadyComputed(String),
    #[error("challenge `{name}` at position {position} needs the previous challenge, which has not been computed")]
    /// The challenge at `position - 1` must be computed first.
    PreviousChallengeNotComputed {
        /// Name of the challenge whose computation was refused.
        name: String,
        /// Declared position of that challenge.
        position: usize,
    },
    #[error("challenge `{0}` declared more than once")]
    /// A strict constructor saw the same name twice.
    DuplicateChallenge(String),
    #[error(transparent)]
    /// The hash capability failed to absorb bytes.
    Hash(#[from] io::Error),
}

impl TranscriptError {
    /// Returns the challenge name the error refers to, if any.
    pub fn challenge_name(&self) -> Option<&str> {
        match self {
            Self::ChallengeNotFound(name)
            | Self::ChallengeAlreadyComputed(name)
            | Self::DuplicateChallenge(name)
            | Self::PreviousChallengeNotComputed { name, .. } => Some(name),
            Self::Hash(_) => None,
        }
    }
}
