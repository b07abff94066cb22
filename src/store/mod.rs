//! Seal record storage backends.

pub mod memory;

use crate::types::{ContentDigest, SealId, SealRecord};

/// Trait for seal record storage backends.
///
/// One record per digest. Implementations must be safe to share across
/// request tasks: writes exclude all readers, and `list` returns a
/// consistent snapshot of the whole store.
pub trait RecordStore: Send + Sync {
    /// Mint the next seal identifier.
    ///
    /// Linearizable: concurrent callers never receive the same identifier.
    fn allocate_identifier(&self) -> SealId;

    /// Insert or replace the record stored under its digest.
    ///
    /// Returns the record that was replaced, if any.
    fn put(&self, record: SealRecord) -> Option<SealRecord>;

    /// Mint an identifier, stamp the creation time and store the record in
    /// one step.
    ///
    /// Allocation, timestamping and insertion happen under the same write
    /// exclusion, so for any digest the stored record always carries the
    /// highest identifier and latest `created_at` issued for it. Returns the
    /// new record and the one it replaced, if any.
    fn seal(&self, digest: ContentDigest, payload: Option<String>) -> (SealRecord, Option<SealRecord>);

    /// Fetch the record for a digest.
    fn get(&self, digest: &ContentDigest) -> Option<SealRecord>;

    /// Snapshot of all records with payloads removed.
    fn list(&self) -> Vec<SealRecord>;

    /// Number of stored records.
    fn len(&self) -> usize;

    /// Whether the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub use memory::InMemoryRecordStore;
