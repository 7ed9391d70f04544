//! Chained Fiat–Shamir transcript with named challenges.
//!
//! Challenges are declared up front in protocol order.  Each challenge digest
//! is derived from the challenge's own name (a domain separator), the digest
//! of the challenge declared immediately before it, and every value bound to
//! it, in binding order:
//!
//! ```text
//! c_0 = H(name_0 || b_0,0 || b_0,1 || ...)
//! c_i = H(name_i || c_(i-1) || b_i,0 || b_i,1 || ...)
//! ```
//!
//! Once computed, a challenge is frozen: its digest is cached and further
//! bindings are rejected, so no party can bias it after seeing it.
//!
//! ```rust
//! use fs_transcript::{Sha256Hash, Transcript};
//!
//! let mut transcript = Transcript::new(Sha256Hash::new(), ["gamma", "beta"]);
//! transcript.bind("gamma", b"commitment".as_slice()).unwrap();
//! let gamma = transcript.compute_challenge("gamma").unwrap();
//! let beta = transcript.compute_challenge("beta").unwrap();
//! assert_eq!(gamma.len(), 32);
//! assert_ne!(gamma, beta);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use tracing::{debug, trace, warn};

use crate::error::TranscriptError;
use crate::hash::TranscriptHash;

/// A declared challenge together with the values bound to it.
#[derive(Clone)]
pub struct Challenge {
    position: usize,
    bindings: Vec<Vec<u8>>,
    value: Option<Vec<u8>>,
}

impl Challenge {
    fn at(position: usize) -> Self {
        Self {
            position,
            bindings: Vec::new(),
            value: None,
        }
    }

    /// Rank of the challenge in declaration order, starting at zero.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Values bound so far, in binding order.
    pub fn bindings(&self) -> &[Vec<u8>] {
        &self.bindings
    }

    /// The computed digest, if any.
    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// Returns `true` once the digest has been computed.
    pub fn is_computed(&self) -> bool {
        self.value.is_some()
    }
}

impl fmt::Debug for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Challenge")
            .field("position", &self.position)
            .field("bindings", &self.bindings.len())
            .field("value", &self.value.as_ref().map(hex::encode))
            .finish()
    }
}

/// Derives named challenges from bound protocol messages.
///
/// The transcript exclusively owns its hash capability `H` and is meant for
/// sequential use within a single proving or verification run.
pub struct Transcript<H> {
    hash: H,
    challenges: HashMap<String, Challenge>,
    // name of the most recently computed challenge
    previous: Option<String>,
}

impl<H: TranscriptHash> Transcript<H> {
    /// Declares the challenges `names`, in protocol order.
    ///
    /// A repeated name replaces its earlier declaration and takes the later
    /// position, leaving a gap in the chain; use [`try_new`](Self::try_new)
    /// to reject duplicates instead.
    pub fn new<I, S>(hash: H, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut challenges = HashMap::new();
        for (position, name) in names.into_iter().enumerate() {
            let name = name.into();
            if challenges.contains_key(&name) {
                warn!(
                    module = "Transcript",
                    challenge = %name,
                    position,
                    "duplicate challenge name, later declaration wins"
                );
            }
            challenges.insert(name, Challenge::at(position));
        }
        debug!(module = "Transcript", challenges = challenges.len(), "declared transcript");
        Self {
            hash,
            challenges,
            previous: None,
        }
    }

    /// Declares the challenges `names`, failing on the first repeated name.
    pub fn try_new<I, S>(hash: H, names: I) -> Result<Self, TranscriptError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut challenges = HashMap::new();
        for (position, name) in names.into_iter().enumerate() {
            let name = name.into();
            if challenges.contains_key(&name) {
                return Err(TranscriptError::DuplicateChallenge(name));
            }
            challenges.insert(name, Challenge::at(position));
        }
        debug!(module = "Transcript", challenges = challenges.len(), "declared transcript");
        Ok(Self {
            hash,
            challenges,
            previous: None,
        })
    }

    /// Binds `value` to the challenge `name`.
    ///
    /// A challenge may be bound to any number of values; they are absorbed in
    /// the order they were bound.  Bound values are concatenated without
    /// framing, so protocols whose messages are not fixed-length should
    /// length-prefix them.
    pub fn bind(&mut self, name: &str, value: impl Into<Vec<u8>>) -> Result<(), TranscriptError> {
        let challenge = self
            .challenges
            .get_mut(name)
            .ok_or_else(|| TranscriptError::ChallengeNotFound(name.to_string()))?;
        if challenge.is_computed() {
            return Err(TranscriptError::ChallengeAlreadyComputed(name.to_string()));
        }
        let value = value.into();
        trace!(module = "Transcript", challenge = name, len = value.len(), "binding value");
        challenge.bindings.push(value);
        Ok(())
    }

    /// Computes (or returns the cached) digest of the challenge `name`.
    ///
    /// Every challenge but the first requires the challenge declared just
    /// before it to have been computed already.  On error the transcript is
    /// left exactly as it was.  The hash capability is reset before absorbing
    /// and again afterwards, whether or not absorption succeeded.
    pub fn compute_challenge(&mut self, name: &str) -> Result<Vec<u8>, TranscriptError> {
        let Self {
            hash,
            challenges,
            previous,
        } = self;

        let challenge = challenges
            .get(name)
            .ok_or_else(|| TranscriptError::ChallengeNotFound(name.to_string()))?;
        if let Some(value) = &challenge.value {
            trace!(module = "Transcript", challenge = name, "returning cached challenge");
            return Ok(value.clone());
        }

        let chained = match challenge.position {
            0 => None,
            position => {
                let prior = previous
                    .as_deref()
                    .and_then(|prior| challenges.get(prior))
                    .filter(|prior| prior.position + 1 == position)
                    .and_then(|prior| prior.value.as_deref());
                match prior {
                    Some(digest) => Some(digest),
                    None => {
                        return Err(TranscriptError::PreviousChallengeNotComputed {
                            name: name.to_string(),
                            position,
                        })
                    }
                }
            }
        };

        hash.reset();
        let digest = absorb(hash, name, chained, &challenge.bindings).map(|()| hash.sum());
        hash.reset();
        let digest = digest?;

        debug!(
            module = "Transcript",
            challenge = name,
            position = challenge.position,
            value = %hex::encode(&digest),
            "computed challenge"
        );
        if let Some(entry) = challenges.get_mut(name) {
            entry.value = Some(digest.clone());
        }
        *previous = Some(name.to_string());
        Ok(digest)
    }
}

impl<H> Transcript<H> {
    /// Looks up a declared challenge.
    pub fn challenge(&self, name: &str) -> Option<&Challenge> {
        self.challenges.get(name)
    }

    /// Number of distinct declared challenges.
    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    /// Returns `true` if no challenge was declared.
    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    /// Declared challenge names, in protocol order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, usize)> = self
            .challenges
            .iter()
            .map(|(name, challenge)| (name.as_str(), challenge.position))
            .collect();
        names.sort_by_key(|&(_, position)| position);
        names.into_iter().map(|(name, _)| name).collect()
    }

    /// Name of the most recently computed challenge.
    pub fn last_computed(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// The owned hash capability.
    pub fn hash(&self) -> &H {
        &self.hash
    }

    /// Consumes the transcript and hands the hash capability back.
    pub fn into_hash(self) -> H {
        self.hash
    }
}

impl<H> fmt::Debug for Transcript<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let challenges: Vec<(&str, &Challenge)> = self
            .names()
            .into_iter()
            .filter_map(|name| self.challenges.get(name).map(|challenge| (name, challenge)))
            .collect();
        f.debug_struct("Transcript")
            .field("challenges", &challenges)
            .field("previous", &self.previous)
            .finish()
    }
}

fn absorb<H: TranscriptHash + ?Sized>(
    hash: &mut H,
    name: &str,
    chained: Option<&[u8]>,
    bindings: &[Vec<u8>],
) -> io::Result<()> {
    trace!(module = "Transcript", challenge = name, bindings = bindings.len(), "absorbing");
    hash.write_all(name.as_bytes())?;
    if let Some(digest) = chained {
        hash.write_all(digest)?;
    }
    for binding in bindings {
        hash.write_all(binding)?;
    }
    Ok(())
}
