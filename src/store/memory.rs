//! In-memory seal record store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::types::{ContentDigest, SealId, SealRecord};
use super::RecordStore;

/// In-memory record store.
///
/// Records live in a `BTreeMap` behind a reader/writer lock. The sequence
/// counter is a separate atomic so bare identifier allocation never waits on
/// readers; [`RecordStore::seal`] bumps it while holding the write lock, so
/// sealed identifiers follow map write order. Contents are lost when the
/// process exits.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    /// Digest -> record.
    records: RwLock<BTreeMap<ContentDigest, SealRecord>>,
    /// Last issued sequence number.
    sequence: AtomicU64,
}

impl InMemoryRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last sequence number handed out (0 when none).
    pub fn last_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn allocate_identifier(&self) -> SealId {
        SealId::new(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn put(&self, record: SealRecord) -> Option<SealRecord> {
        self.records.write().insert(record.digest.clone(), record)
    }

    fn seal(&self, digest: ContentDigest, payload: Option<String>) -> (SealRecord, Option<SealRecord>) {
        let mut records = self.records.write();

        let record = SealRecord::new(self.allocate_identifier(), digest, payload);
        let previous = records.insert(record.digest.clone(), record.clone());

        (record, previous)
    }

    fn get(&self, digest: &ContentDigest) -> Option<SealRecord> {
        self.records.read().get(digest).cloned()
    }

    fn list(&self) -> Vec<SealRecord> {
        let mut records: Vec<SealRecord> = self.records
            .read()
            .values()
            .map(SealRecord::redacted)
            .collect();

        // Creation order
        records.sort_by_key(|r| r.identifier);
        records
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}
