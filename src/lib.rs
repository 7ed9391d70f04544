#![deny(missing_docs)]

//! # fs_transcript
//!
//! **fs_transcript** turns an interactive proof into a non-interactive one by
//! deriving every verifier challenge from a hash of the protocol transcript
//! (the Fiat–Shamir heuristic).  Challenges are named and declared up front in
//! protocol order; protocol messages are bound to the challenges they must
//! influence, and each challenge is then computed on demand.
//!
//! ## Features
//!
//! * **Chained challenges**: the [`Transcript`] type folds each challenge's
//!   name, the digest of the previous challenge and all bound values through
//!   the hash, so every challenge commits to the whole history before it.
//! * **Strict ordering**: binding after computation and computing out of
//!   order are both refused with a typed [`TranscriptError`].
//! * **Pluggable hashing**: anything implementing [`TranscriptHash`] can drive
//!   a transcript.  BLAKE2b-256, SHA-256, SHA3-256 and Keccak-256 ship out of
//!   the box and can be selected at runtime through [`HashId`].
//! * **Shared layouts**: a [`TranscriptConfig`] captures the hash and the
//!   challenge order as JSON so prover and verifier agree on both.
//!
//! ## Usage
//!
//! ```rust
//! use fs_transcript::{HashId, Transcript};
//!
//! let mut transcript = Transcript::new(HashId::Sha256.hasher(), ["c0"]);
//! transcript.bind("c0", vec![0u8; 32]).unwrap();
//! let challenge = transcript.compute_challenge("c0").unwrap();
//! assert_eq!(challenge.len(), HashId::Sha256.size());
//! // Cached: asking again returns the very same bytes.
//! assert_eq!(transcript.compute_challenge("c0").unwrap(), challenge);
//! ```

pub mod config;
mod error;
pub mod hash;
mod transcript;

pub use config::{ConfigError, TranscriptConfig};
pub use error::TranscriptError;
pub use hash::{
    Blake2b256Hash, DigestHash, HashId, Keccak256Hash, Sha256Hash, Sha3_256Hash, TranscriptHash,
    UnknownHash,
};
pub use transcript::{Challenge, Transcript};
