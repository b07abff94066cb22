//! Sealing, verification, resolution and listing.
//!
//! The notary combines a [`DigestClient`] with a [`RecordStore`]:
//!
//! ```text
//! seal(text)     → digest → store seal (allocate + stamp + insert) → record
//! verify(text)   → digest → get → matched?
//! resolve(digest)         → get → found?
//! list()                  → snapshot (payload redacted)
//! ```
//!
//! Empty input is rejected before any digest call, and nothing is written to
//! the store unless the digest call succeeded.

use std::sync::Arc;

use crate::digest::{DigestClient, DigestError};
use crate::store::RecordStore;
use crate::types::{ContentDigest, ResolutionOutcome, SealRecord, VerificationOutcome};

/// Target for domain event logs.
pub const EVENT_TARGET: &str = "document_notary::events";

/// Error type for notary operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotaryError {
    /// A required request field was empty.
    #[error("{} field is required", capitalize(.field))]
    Validation {
        /// Name of the empty field.
        field: &'static str,
    },

    /// The digest could not be computed.
    #[error(transparent)]
    DigestUnavailable(#[from] DigestError),
}

impl NotaryError {
    fn empty(field: &'static str) -> Self {
        Self::Validation { field }
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Document notary.
///
/// Cheap to clone; clones share the same store and digest client.
pub struct Notary<S: RecordStore, D: DigestClient> {
    store: Arc<S>,
    digester: Arc<D>,
}

impl<S: RecordStore, D: DigestClient> Notary<S, D> {
    /// Create a notary over a store and a digest capability.
    pub fn new(store: Arc<S>, digester: Arc<D>) -> Self {
        Self { store, digester }
    }

    /// The underlying record store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Seal a document.
    ///
    /// Always mints a fresh identifier. Sealing content whose digest is
    /// already stored replaces that record, so the previous identifier no
    /// longer resolves for this digest.
    pub async fn seal(&self, text: &str) -> Result<SealRecord, NotaryError> {
        if text.is_empty() {
            return Err(NotaryError::empty("text"));
        }

        let digest = self.digester.compute_digest(text).await?;

        let (record, previous) = self.store.seal(digest, Some(text.to_string()));

        match previous {
            Some(previous) => tracing::info!(
                target: EVENT_TARGET,
                identifier = %record.identifier,
                previous_identifier = %previous.identifier,
                digest = %record.digest,
                "Seal overwritten"
            ),
            None => tracing::info!(
                target: EVENT_TARGET,
                identifier = %record.identifier,
                digest = %record.digest,
                "Seal created"
            ),
        }

        Ok(record)
    }

    /// Check whether a document has been sealed.
    pub async fn verify(&self, text: &str) -> Result<VerificationOutcome, NotaryError> {
        if text.is_empty() {
            return Err(NotaryError::empty("text"));
        }

        let digest = self.digester.compute_digest(text).await?;
        let outcome = VerificationOutcome::from_lookup(self.store.get(&digest));

        tracing::info!(
            target: EVENT_TARGET,
            matched = outcome.matched,
            identifier = %outcome.record.as_ref().map(|r| r.identifier.to_string()).unwrap_or_default(),
            "Verification completed"
        );

        Ok(outcome)
    }

    /// Look up a seal by digest without recomputing anything.
    ///
    /// The digest is not checked for well-formedness.
    pub fn resolve(&self, digest: &ContentDigest) -> Result<ResolutionOutcome, NotaryError> {
        if digest.is_empty() {
            return Err(NotaryError::empty("digest"));
        }

        Ok(ResolutionOutcome::from_lookup(self.store.get(digest)))
    }

    /// All seals, payloads removed.
    pub fn list(&self) -> Vec<SealRecord> {
        self.store.list()
    }
}

impl<S: RecordStore, D: DigestClient> Clone for Notary<S, D> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            digester: Arc::clone(&self.digester),
        }
    }
}
