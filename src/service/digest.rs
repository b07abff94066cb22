//! Axum routes for the digest service.
//!
//! A stateless SHA-256 endpoint implementing the boundary that
//! [`HttpDigestClient`](crate::digest::HttpDigestClient) consumes.

use axum::{
    body::Bytes,
    extract::Json,
    middleware,
    routing::{get, post},
    Router,
};

use crate::digest::{compute_digest, DigestRequest, DigestResponse};
use crate::notary::NotaryError;

use super::error::{only_get, only_post, parse_body, ApiError};
use super::middleware::{cors_layer, request_logging_middleware};
use super::routes::HealthResponse;

/// Service name reported by the health endpoint.
pub const DIGEST_SERVICE_NAME: &str = "digest-service";

/// Digest a document.
async fn hash_handler(body: Bytes) -> Result<Json<DigestResponse>, ApiError> {
    let request: DigestRequest = parse_body(&body)?;

    if request.text.is_empty() {
        return Err(NotaryError::Validation { field: "text" }.into());
    }

    Ok(Json(DigestResponse {
        digest: compute_digest(&request.text),
    }))
}

/// Health check endpoint.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: DIGEST_SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the Axum router for the digest service.
pub fn create_digest_router() -> Router {
    Router::new()
        .route("/hash", post(hash_handler).fallback(only_post))
        .route("/health", get(health_handler).fallback(only_get))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(cors_layer())
}
