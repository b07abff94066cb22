//! Axum routes for the notary service.

use axum::{
    body::Bytes,
    extract::{Json, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::digest::DigestClient;
use crate::store::RecordStore;
use crate::types::{null_as_empty, ContentDigest, SealId, SealRecord};

use super::error::{only_get, only_post, parse_body, ApiError};
use super::middleware::{cors_layer, request_logging_middleware};
use super::state::ServiceState;

/// Service name reported by the health endpoint.
pub const NOTARY_SERVICE_NAME: &str = "notary-service";

/// Message returned when a document is sealed.
pub const SEALED_MESSAGE: &str = "Document sealed successfully";
const VERIFIED_MESSAGE: &str = "Document verified! This document was sealed.";
const NOT_VERIFIED_MESSAGE: &str =
    "Document not found. This document was never sealed or has been modified.";
const RESOLVED_MESSAGE: &str = "Digest found. This digest was sealed.";
const NOT_RESOLVED_MESSAGE: &str = "Digest not found. No seal exists for this digest.";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to seal or verify a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// Document text. A missing or null field counts as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

/// Request to resolve a digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// Digest to look up. A missing or null field counts as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub digest: String,
}

/// Response to a successful seal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealResponse {
    pub identifier: SealId,
    pub digest: ContentDigest,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

impl From<SealRecord> for SealResponse {
    fn from(record: SealRecord) -> Self {
        Self {
            identifier: record.identifier,
            digest: record.digest,
            created_at: record.created_at,
            message: SEALED_MESSAGE.to_string(),
        }
    }
}

/// Response to a verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub matched: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<SealRecord>,
}

/// Response to a resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub found: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<SealRecord>,
}

/// All seals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub count: usize,
    pub records: Vec<SealRecord>,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Seal a document.
async fn seal_handler<S: RecordStore + 'static, D: DigestClient + 'static>(
    State(state): State<Arc<ServiceState<S, D>>>,
    body: Bytes,
) -> Result<(StatusCode, Json<SealResponse>), ApiError> {
    let request: DocumentRequest = parse_body(&body)?;
    let record = state.notary.seal(&request.text).await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Verify a document against the sealed digests.
async fn verify_handler<S: RecordStore + 'static, D: DigestClient + 'static>(
    State(state): State<Arc<ServiceState<S, D>>>,
    body: Bytes,
) -> Result<Json<VerifyResponse>, ApiError> {
    let request: DocumentRequest = parse_body(&body)?;
    let outcome = state.notary.verify(&request.text).await?;

    let message = if outcome.matched { VERIFIED_MESSAGE } else { NOT_VERIFIED_MESSAGE };

    Ok(Json(VerifyResponse {
        matched: outcome.matched,
        message: message.to_string(),
        record: outcome.record,
    }))
}

/// Resolve a seal by digest.
async fn resolve_handler<S: RecordStore + 'static, D: DigestClient + 'static>(
    State(state): State<Arc<ServiceState<S, D>>>,
    body: Bytes,
) -> Result<Json<ResolveResponse>, ApiError> {
    let request: ResolveRequest = parse_body(&body)?;
    let outcome = state.notary.resolve(&ContentDigest::new(request.digest))?;

    let message = if outcome.found { RESOLVED_MESSAGE } else { NOT_RESOLVED_MESSAGE };

    Ok(Json(ResolveResponse {
        found: outcome.found,
        message: message.to_string(),
        record: outcome.record,
    }))
}

/// List all seals.
async fn list_handler<S: RecordStore + 'static, D: DigestClient + 'static>(
    State(state): State<Arc<ServiceState<S, D>>>,
) -> Json<ListResponse> {
    let records = state.notary.list();

    Json(ListResponse {
        count: records.len(),
        records,
    })
}

/// Health check endpoint.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: NOTARY_SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Router Construction
// ============================================================================

/// Create the Axum router for the notary service.
///
/// Includes request logging and CORS; binaries may add further layers.
pub fn create_router<S, D>(state: ServiceState<S, D>) -> Router
where
    S: RecordStore + 'static,
    D: DigestClient + 'static,
{
    let state = Arc::new(state);

    Router::new()
        .route("/seal", post(seal_handler::<S, D>).fallback(only_post))
        .route("/verify", post(verify_handler::<S, D>).fallback(only_post))
        .route("/resolve", post(resolve_handler::<S, D>).fallback(only_post))
        .route("/list", get(list_handler::<S, D>).fallback(only_get))
        .route("/health", get(health_handler).fallback(only_get))
        .with_state(state)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(cors_layer())
}
