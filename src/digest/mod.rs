//! Digest computation capability.
//!
//! The notary never hashes content itself: it asks a [`DigestClient`] for the
//! digest of a document. Production deployments talk to the remote digest
//! service over HTTP ([`HttpDigestClient`]); [`LocalDigester`] computes the
//! same SHA-256 digest in process.
//!
//! ## Failure modes
//!
//! | Error | Cause |
//! |-------|-------|
//! | `Unreachable` | Transport failure or timeout |
//! | `BadStatus` | Remote answered with a non-success status |
//! | `Decode` | Response body is not a `{"digest": ...}` object |
//!
//! No retries are performed; errors propagate to the caller immediately.

pub mod local;

#[cfg(feature = "http-client")]
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::ContentDigest;

/// Errors from digest computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigestError {
    /// The digest service could not be reached (includes timeouts).
    #[error("digest service unreachable: {0}")]
    Unreachable(String),

    /// The digest service answered with a non-success status.
    #[error("digest service returned status: {0}")]
    BadStatus(u16),

    /// The response body could not be decoded into a digest.
    #[error("failed to decode digest response: {0}")]
    Decode(String),
}

/// Capability that turns document text into a content digest.
#[async_trait]
pub trait DigestClient: Send + Sync {
    /// Compute the digest of `text`.
    async fn compute_digest(&self, text: &str) -> Result<ContentDigest, DigestError>;
}

/// Request body of the digest service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestRequest {
    /// Text to digest. A missing or null field counts as empty.
    #[serde(default, deserialize_with = "crate::types::null_as_empty")]
    pub text: String,
}

/// Response body of the digest service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestResponse {
    /// Lowercase hex digest. Older hashers answer with a `hash` key.
    #[serde(alias = "hash")]
    pub digest: String,
}

pub use local::{compute_digest, LocalDigester};

#[cfg(feature = "http-client")]
pub use http::HttpDigestClient;
