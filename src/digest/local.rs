//! In-process SHA-256 digests.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::types::ContentDigest;
use super::{DigestClient, DigestError};

/// Compute the SHA-256 digest of `text` as lowercase hex.
///
/// The text is hashed byte-for-byte; no normalization is applied, so any
/// change to the document (including whitespace) changes the digest.
///
/// # Example
///
/// ```rust
/// use document_notary::digest::compute_digest;
///
/// let digest = compute_digest("hello");
/// assert_eq!(digest.len(), 64);
/// assert!(digest.starts_with("2cf24dba"));
/// ```
pub fn compute_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Digest client that hashes in process.
///
/// Produces the same digests as the digest service and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDigester;

impl LocalDigester {
    /// Create a local digester.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DigestClient for LocalDigester {
    async fn compute_digest(&self, text: &str) -> Result<ContentDigest, DigestError> {
        Ok(ContentDigest::new(compute_digest(text)))
    }
}
