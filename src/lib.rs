//! # document-notary
//!
//! Document sealing: bind a content digest to a sequential seal identifier
//! and a timestamp, then verify or resolve that binding later.
//!
//! ## Core Contract
//!
//! 1. `seal(text)`: digest the text, mint `SEAL-NNNNNN`, store the record
//! 2. `verify(text)`: digest the text and report whether a seal exists
//! 3. `resolve(digest)`: look up a seal by digest directly
//! 4. `list()`: all seals, original text removed
//!
//! ## Architecture
//!
//! ```text
//! HTTP (axum) → Notary → DigestClient (remote digest service or local SHA-256)
//!                  ↓
//!             RecordStore (in-memory, RwLock + atomic sequence)
//! ```
//!
//! ## Guarantees
//!
//! - One record per digest; re-sealing replaces it under a fresh identifier
//! - Identifiers are never reused and increase in creation order
//! - Failed digest calls never touch the store
//!
//! Records live in memory only and are lost on restart.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod store;
pub mod digest;
pub mod notary;
pub mod config;
pub mod telemetry;

#[cfg(feature = "service")]
pub mod service;

// Re-exports
pub use types::{SealId, ContentDigest, SealRecord, VerificationOutcome, ResolutionOutcome};
pub use store::{RecordStore, InMemoryRecordStore};
pub use digest::{DigestClient, DigestError, LocalDigester, compute_digest};
#[cfg(feature = "http-client")]
pub use digest::HttpDigestClient;
pub use notary::{Notary, NotaryError};
pub use config::{NotaryConfig, DigestServiceConfig, ConfigError, DigestMode, LogFormat};

// Service re-exports (when service feature is enabled)
#[cfg(feature = "service")]
pub use service::{create_router, create_digest_router, ServiceState, ApiError};
