//! Hash capabilities consumed by the transcript.
//!
//! A transcript never looks inside its hash function: it only resets it,
//! absorbs bytes through [`std::io::Write`] and reads the digest back.  The
//! [`TranscriptHash`] trait captures exactly that surface.  [`DigestHash`]
//! adapts any RustCrypto [`Digest`] (BLAKE2b-256, SHA-256, SHA3-256,
//! Keccak-256) and [`HashId`] selects one of them at runtime.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use blake2::digest::{consts::U32, Digest};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A resettable hash function that absorbs bytes and yields a digest.
///
/// Absorption goes through [`Write::write`] and is therefore fallible, which
/// lets capabilities backed by fallible sinks report errors instead of
/// panicking.
pub trait TranscriptHash: Write {
    /// Clears all absorbed state.
    fn reset(&mut self);

    /// Returns the digest of everything absorbed since the last reset.
    ///
    /// Does not consume the absorbed state; calling `sum` twice in a row
    /// yields the same bytes.
    fn sum(&self) -> Vec<u8>;

    /// Length of the digests produced by [`sum`](Self::sum), in bytes.
    fn size(&self) -> usize;
}

impl<T: TranscriptHash + ?Sized> TranscriptHash for Box<T> {
    fn reset(&mut self) {
        (**self).reset()
    }

    fn sum(&self) -> Vec<u8> {
        (**self).sum()
    }

    fn size(&self) -> usize {
        (**self).size()
    }
}

impl<T: TranscriptHash + ?Sized> TranscriptHash for &mut T {
    fn reset(&mut self) {
        (**self).reset()
    }

    fn sum(&self) -> Vec<u8> {
        (**self).sum()
    }

    fn size(&self) -> usize {
        (**self).size()
    }
}

/// [`TranscriptHash`] adapter over a RustCrypto [`Digest`].
#[derive(Debug, Clone, Default)]
pub struct DigestHash<D> {
    inner: D,
}

impl<D: Digest> DigestHash<D> {
    /// Creates an adapter with a fresh digest state.
    pub fn new() -> Self {
        Self { inner: D::new() }
    }
}

impl<D: Digest> Write for DigestHash<D> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Digest::update(&mut self.inner, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<D: Digest + Clone> TranscriptHash for DigestHash<D> {
    fn reset(&mut self) {
        self.inner = D::new();
    }

    fn sum(&self) -> Vec<u8> {
        self.inner.clone().finalize().to_vec()
    }

    fn size(&self) -> usize {
        <D as Digest>::output_size()
    }
}

/// BLAKE2b with a 256-bit output.
pub type Blake2b256Hash = DigestHash<blake2::Blake2b<U32>>;
/// SHA-256.
pub type Sha256Hash = DigestHash<sha2::Sha256>;
/// SHA3-256.
pub type Sha3_256Hash = DigestHash<sha3::Sha3_256>;
/// Keccak-256 (pre-standard SHA-3 padding).
pub type Keccak256Hash = DigestHash<sha3::Keccak256>;

/// Identifier of a supported hash capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashId {
    /// BLAKE2b-256.
    #[serde(rename = "BLAKE2B_256")]
    Blake2b256,
    /// SHA-256.
    #[serde(rename = "SHA256")]
    Sha256,
    /// SHA3-256.
    #[serde(rename = "SHA3_256")]
    Sha3_256,
    /// Keccak-256.
    #[serde(rename = "KECCAK_256")]
    Keccak256,
}

/// Raised when a hash identifier does not name a supported hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hash identifier `{0}`")]
pub struct UnknownHash(pub String);

impl HashId {
    /// Every supported identifier.
    pub const ALL: [HashId; 4] = [
        HashId::Blake2b256,
        HashId::Sha256,
        HashId::Sha3_256,
        HashId::Keccak256,
    ];

    /// Instantiates a fresh hash capability.
    pub fn hasher(self) -> Box<dyn TranscriptHash> {
        match self {
            HashId::Blake2b256 => Box::new(Blake2b256Hash::new()),
            HashId::Sha256 => Box::new(Sha256Hash::new()),
            HashId::Sha3_256 => Box::new(Sha3_256Hash::new()),
            HashId::Keccak256 => Box::new(Keccak256Hash::new()),
        }
    }

    /// Digest size in bytes.
    pub fn size(self) -> usize {
        match self {
            HashId::Blake2b256 | HashId::Sha256 | HashId::Sha3_256 | HashId::Keccak256 => 32,
        }
    }

    /// Canonical name, as used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            HashId::Blake2b256 => "BLAKE2B_256",
            HashId::Sha256 => "SHA256",
            HashId::Sha3_256 => "SHA3_256",
            HashId::Keccak256 => "KECCAK_256",
        }
    }
}

impl fmt::Display for HashId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashId {
    type Err = UnknownHash;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownHash(s.to_string()))
    }
}
