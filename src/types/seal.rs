//! Seal identifiers, content digests and seal records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix of every seal identifier.
pub const SEAL_ID_PREFIX: &str = "SEAL-";

/// Minimum width of the zero-padded sequence number.
const SEAL_ID_WIDTH: usize = 6;

/// Identifier minted for a seal, e.g. `SEAL-000042`.
///
/// Wraps the store sequence number and orders by it, so identifiers sort in
/// creation order. Sequence numbers above 999999 widen the numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SealId(u64);

impl SealId {
    /// Create an identifier from a sequence number.
    pub fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Get the sequence number.
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", SEAL_ID_PREFIX, self.0, width = SEAL_ID_WIDTH)
    }
}

/// Error parsing a seal identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid seal identifier: {0}")]
pub struct SealIdParseError(String);

impl FromStr for SealId {
    type Err = SealIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(SEAL_ID_PREFIX)
            .filter(|d| d.len() >= SEAL_ID_WIDTH && d.bytes().all(|b| b.is_ascii_digit()))
            // Padding only fills the minimum width
            .filter(|d| d.len() == SEAL_ID_WIDTH || !d.starts_with('0'))
            .ok_or_else(|| SealIdParseError(s.to_string()))?;

        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| SealIdParseError(s.to_string()))
    }
}

impl From<SealId> for String {
    fn from(id: SealId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SealId {
    type Error = SealIdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Content digest, the primary key of the record store.
///
/// Opaque to the notary: whatever string the digest service returns (or the
/// caller supplies for resolution) is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Wrap a digest string.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Get the digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the digest is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentDigest {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContentDigest {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A sealed document: digest bound to an identifier and a creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealRecord {
    /// Identifier minted when the seal was created.
    pub identifier: SealId,
    /// Digest of the sealed content.
    pub digest: ContentDigest,
    /// When the seal was created (UTC).
    pub created_at: DateTime<Utc>,
    /// Original text. Kept internally, never exposed.
    #[serde(default, skip_serializing)]
    pub payload: Option<String>,
}

impl SealRecord {
    /// Create a record stamped with the current time.
    pub fn new(identifier: SealId, digest: ContentDigest, payload: Option<String>) -> Self {
        Self {
            identifier,
            digest,
            created_at: Utc::now(),
            payload,
        }
    }

    /// Copy of this record with the payload removed.
    pub fn redacted(&self) -> Self {
        Self {
            payload: None,
            ..self.clone()
        }
    }
}
