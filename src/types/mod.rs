//! Core types for the notary.

pub mod seal;
pub mod outcome;

pub use seal::{SealId, SealIdParseError, ContentDigest, SealRecord, SEAL_ID_PREFIX};
pub use outcome::{VerificationOutcome, ResolutionOutcome};

use serde::{Deserialize, Deserializer};

/// Deserialize a string field, reading JSON `null` as the empty string.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
