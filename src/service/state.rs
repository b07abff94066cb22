//! Service state management.

use std::sync::Arc;

use crate::digest::DigestClient;
use crate::notary::Notary;
use crate::store::RecordStore;

/// Shared service state.
///
/// Holds the notary, which owns the record store and the digest capability.
/// The store is created once at startup and shared by every request.
pub struct ServiceState<S: RecordStore + 'static, D: DigestClient + 'static> {
    /// Sealing, verification, resolution and listing.
    pub notary: Notary<S, D>,
}

impl<S: RecordStore + 'static, D: DigestClient + 'static> ServiceState<S, D> {
    /// Create service state from a store and a digest client.
    pub fn new(store: S, digester: D) -> Self {
        Self {
            notary: Notary::new(Arc::new(store), Arc::new(digester)),
        }
    }

    /// Create service state around an existing notary.
    pub fn with_notary(notary: Notary<S, D>) -> Self {
        Self { notary }
    }
}

impl<S: RecordStore + 'static, D: DigestClient + 'static> Clone for ServiceState<S, D> {
    fn clone(&self) -> Self {
        Self {
            notary: self.notary.clone(),
        }
    }
}
