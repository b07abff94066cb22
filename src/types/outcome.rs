//! Results of read-only notary operations.

use super::seal::SealRecord;

/// Result of verifying a document against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// Whether a seal exists for the document's digest.
    pub matched: bool,
    /// The matching seal, redacted.
    pub record: Option<SealRecord>,
}

impl VerificationOutcome {
    pub(crate) fn from_lookup(record: Option<SealRecord>) -> Self {
        Self {
            matched: record.is_some(),
            record: record.map(|r| r.redacted()),
        }
    }
}

/// Result of resolving a caller-supplied digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// Whether a seal exists for the digest.
    pub found: bool,
    /// The seal, redacted.
    pub record: Option<SealRecord>,
}

impl ResolutionOutcome {
    pub(crate) fn from_lookup(record: Option<SealRecord>) -> Self {
        Self {
            found: record.is_some(),
            record: record.map(|r| r.redacted()),
        }
    }
}
