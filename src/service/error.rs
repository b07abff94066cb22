//! Error envelope shared by the notary and digest routers.

use axum::{
    body::Bytes,
    extract::Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::notary::NotaryError;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request body is not valid JSON for the route.
    #[error("Invalid JSON body")]
    MalformedRequest(String),

    /// The route does not accept this method.
    #[error("Only {allowed} method is allowed")]
    MethodNotAllowed {
        /// The method the route accepts.
        allowed: &'static str,
        /// The method that was used.
        used: Method,
    },

    /// The notary rejected the request.
    #[error(transparent)]
    Notary(#[from] NotaryError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Notary(NotaryError::Validation { .. }) => StatusCode::BAD_REQUEST,
            Self::Notary(NotaryError::DigestUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => "MALFORMED_REQUEST",
            Self::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            Self::Notary(NotaryError::Validation { .. }) => "VALIDATION_ERROR",
            Self::Notary(NotaryError::DigestUnavailable(_)) => "DIGEST_UNAVAILABLE",
        }
    }
}

/// Error body returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code.
    pub code: String,
    /// Additional error details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let details = match err {
            ApiError::MalformedRequest(reason) => Some(reason.clone()),
            _ => None,
        };

        Self {
            error: err.to_string(),
            code: err.code().to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse::from(&self);

        tracing::warn!(
            status = status.as_u16(),
            code = %body.code,
            error = %body.error,
            details = ?body.details,
            "Request error"
        );

        (status, Json(body)).into_response()
    }
}

/// Decode a JSON request body.
///
/// The `Content-Type` header is not checked; any body that parses is accepted.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedRequest(e.to_string()))
}

/// Fallback for POST-only routes.
pub(crate) async fn only_post(method: Method) -> ApiError {
    ApiError::MethodNotAllowed { allowed: "POST", used: method }
}

/// Fallback for GET-only routes.
pub(crate) async fn only_get(method: Method) -> ApiError {
    ApiError::MethodNotAllowed { allowed: "GET", used: method }
}
