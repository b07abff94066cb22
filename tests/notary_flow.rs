//! End-to-end tests for sealing, verification, resolution and listing.
//!
//! These run the notary over the in-memory store with in-process digests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use document_notary::{
    ContentDigest, DigestClient, DigestError, InMemoryRecordStore, LocalDigester, Notary,
    NotaryError, RecordStore, SealId, SealRecord,
};
use proptest::prelude::*;

const HELLO_DIGEST: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

type LocalNotary = Notary<InMemoryRecordStore, LocalDigester>;

fn local_notary() -> LocalNotary {
    Notary::new(Arc::new(InMemoryRecordStore::new()), Arc::new(LocalDigester::new()))
}

/// Digest client that records every call and always fails.
#[derive(Default)]
struct UnreachableDigester {
    calls: AtomicUsize,
}

#[async_trait]
impl DigestClient for UnreachableDigester {
    async fn compute_digest(&self, _text: &str) -> Result<ContentDigest, DigestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DigestError::Unreachable("connection refused".to_string()))
    }
}

/// Store that stalls the first caller of `allocate_identifier`, widening the
/// window between minting an identifier and writing the record.
#[derive(Default)]
struct StallingStore {
    inner: InMemoryRecordStore,
    stalled: AtomicUsize,
}

impl RecordStore for StallingStore {
    fn allocate_identifier(&self) -> SealId {
        let id = self.inner.allocate_identifier();
        if self.stalled.fetch_add(1, Ordering::SeqCst) == 0 {
            std::thread::sleep(Duration::from_millis(50));
        }
        id
    }

    fn put(&self, record: SealRecord) -> Option<SealRecord> {
        self.inner.put(record)
    }

    fn seal(&self, digest: ContentDigest, payload: Option<String>) -> (SealRecord, Option<SealRecord>) {
        self.inner.seal(digest, payload)
    }

    fn get(&self, digest: &ContentDigest) -> Option<SealRecord> {
        self.inner.get(digest)
    }

    fn list(&self) -> Vec<SealRecord> {
        self.inner.list()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sealing
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_seal_then_resolve_hello() {
    let notary = local_notary();

    let sealed = notary.seal("hello").await.unwrap();
    assert_eq!(sealed.identifier.to_string(), "SEAL-000001");
    assert_eq!(sealed.digest.as_str(), HELLO_DIGEST);

    let resolved = notary.resolve(&ContentDigest::from(HELLO_DIGEST)).unwrap();
    assert!(resolved.found);

    let record = resolved.record.unwrap();
    assert_eq!(record.identifier.to_string(), "SEAL-000001");
    assert_eq!(record.digest.as_str(), HELLO_DIGEST);
    assert_eq!(record.created_at, sealed.created_at);
    assert_eq!(record.payload, None);
}

#[tokio::test]
async fn test_reseal_exposes_latest_record() {
    let notary = local_notary();

    let first = notary.seal("quarterly report").await.unwrap();
    let second = notary.seal("quarterly report").await.unwrap();

    assert_eq!(first.digest, second.digest);
    assert_ne!(first.identifier, second.identifier);
    assert!(second.identifier > first.identifier);
    assert!(second.created_at >= first.created_at);

    let verified = notary.verify("quarterly report").await.unwrap();
    assert_eq!(verified.record.unwrap().identifier, second.identifier);

    let listed = notary.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].identifier, second.identifier);
}

#[tokio::test]
async fn test_reseal_advances_sequence_for_later_seals() {
    let notary = local_notary();

    notary.seal("a").await.unwrap();
    notary.seal("a").await.unwrap();
    let third = notary.seal("b").await.unwrap();

    assert_eq!(third.identifier.to_string(), "SEAL-000003");
    assert_eq!(notary.list().len(), 2);
}

#[tokio::test]
async fn test_list_matches_resolve_without_payload() {
    let notary = local_notary();
    let sealed = notary.seal("lease agreement").await.unwrap();

    let listed = notary.list();
    let resolved = notary.resolve(&sealed.digest).unwrap().record.unwrap();

    assert_eq!(listed, vec![resolved.clone()]);
    assert_eq!(resolved.identifier, sealed.identifier);
    assert_eq!(resolved.created_at, sealed.created_at);
    assert!(listed[0].payload.is_none());

    // The store itself still keeps the text
    let stored = notary.store().get(&sealed.digest).unwrap();
    assert_eq!(stored.payload.as_deref(), Some("lease agreement"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Failure paths
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_text_fails_before_digest_call() {
    let digester = Arc::new(UnreachableDigester::default());
    let notary = Notary::new(Arc::new(InMemoryRecordStore::new()), Arc::clone(&digester));

    assert!(matches!(notary.seal("").await, Err(NotaryError::Validation { field: "text" })));
    assert!(matches!(notary.verify("").await, Err(NotaryError::Validation { field: "text" })));
    assert_eq!(digester.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unreachable_digest_service_leaves_store_untouched() {
    let store = Arc::new(InMemoryRecordStore::new());
    let digester = Arc::new(UnreachableDigester::default());
    let notary = Notary::new(Arc::clone(&store), Arc::clone(&digester));

    let err = notary.seal("hello").await.unwrap_err();
    assert!(matches!(err, NotaryError::DigestUnavailable(DigestError::Unreachable(_))));
    assert_eq!(err.to_string(), "digest service unreachable: connection refused");

    assert!(store.is_empty());
    assert_eq!(store.last_sequence(), 0);
    assert_eq!(digester.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_resolve_works_without_digest_service() {
    let store = Arc::new(InMemoryRecordStore::new());

    // Seal through a working notary, then resolve through one whose digest
    // service is down
    let sealed = Notary::new(Arc::clone(&store), Arc::new(LocalDigester::new()))
        .seal("hello")
        .await
        .unwrap();

    let digester = Arc::new(UnreachableDigester::default());
    let offline = Notary::new(Arc::clone(&store), Arc::clone(&digester));

    let resolved = offline.resolve(&sealed.digest).unwrap();
    assert!(resolved.found);
    assert_eq!(digester.calls.load(Ordering::SeqCst), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Concurrency
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_seals_get_gap_free_identifiers() {
    let notary = local_notary();
    let n = 200;

    let handles: Vec<_> = (0..n)
        .map(|i| {
            let notary = notary.clone();
            tokio::spawn(async move { notary.seal(&format!("document #{}", i)).await })
        })
        .collect();

    let mut sequences = Vec::with_capacity(n);
    for handle in handles {
        let record = handle.await.unwrap().unwrap();
        sequences.push(record.identifier.sequence());
    }

    sequences.sort_unstable();
    let expected: Vec<u64> = (1..=n as u64).collect();
    assert_eq!(sequences, expected);

    let listed = notary.list();
    assert_eq!(listed.len(), n);
    let digests: HashSet<_> = listed.iter().map(|r| r.digest.clone()).collect();
    assert_eq!(digests.len(), n);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reseals_keep_one_record() {
    let notary = local_notary();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let notary = notary.clone();
            tokio::spawn(async move { notary.seal("same content").await })
        })
        .collect();

    let mut sealed = Vec::with_capacity(50);
    for handle in handles {
        sealed.push(handle.await.unwrap().unwrap());
    }

    let identifiers: HashSet<_> = sealed.iter().map(|r| r.identifier).collect();
    assert_eq!(identifiers.len(), 50);

    let listed = notary.list();
    assert_eq!(listed.len(), 1);

    // The surviving record is the newest one handed out
    let newest = identifiers.iter().max().copied().unwrap();
    assert_eq!(listed[0].identifier, newest);
    assert!(sealed.iter().all(|r| listed[0].created_at >= r.created_at));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stalled_reseal_does_not_overwrite_newer_record() {
    let notary = Notary::new(Arc::new(StallingStore::default()), Arc::new(LocalDigester::new()));

    let first = {
        let notary = notary.clone();
        tokio::spawn(async move { notary.seal("same").await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    let second = {
        let notary = notary.clone();
        tokio::spawn(async move { notary.seal("same").await })
    };

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();
    let newest = first.identifier.max(second.identifier);

    let exposed = notary.resolve(&first.digest).unwrap().record.unwrap();
    assert_eq!(exposed.identifier, newest);
    assert!(exposed.created_at >= first.created_at);
    assert!(exposed.created_at >= second.created_at);
    assert_eq!(notary.list().len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_seal_then_verify_matches(text in ".{1,200}") {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let notary = local_notary();

            let sealed = notary.seal(&text).await.unwrap();
            let verified = notary.verify(&text).await.unwrap();

            assert!(verified.matched);
            assert_eq!(verified.record.unwrap().digest, sealed.digest);
        });
    }

    #[test]
    fn prop_sealing_twice_increases_identifier(text in ".{1,200}") {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let notary = local_notary();

            let first = notary.seal(&text).await.unwrap();
            let second = notary.seal(&text).await.unwrap();

            assert_eq!(first.digest, second.digest);
            assert!(second.identifier > first.identifier);
            assert_eq!(
                notary.resolve(&second.digest).unwrap().record.unwrap().identifier,
                second.identifier
            );
        });
    }
}
