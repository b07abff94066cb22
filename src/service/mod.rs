//! Notary REST Service
//!
//! Exposes the notary and the digest computation over HTTP.
//!
//! ## Notary endpoints
//!
//! - `POST /seal` - Seal a document (`{text}`)
//! - `POST /verify` - Check whether a document was sealed (`{text}`)
//! - `POST /resolve` - Look up a seal by digest (`{digest}`)
//! - `GET /list` - All seals, without document text
//! - `GET /health` - Service health
//!
//! ## Digest endpoints
//!
//! - `POST /hash` - SHA-256 of `{text}` as `{digest}`
//! - `GET /health` - Service health
//!
//! Errors are returned as `{error, code}` with a fixed status per error kind.

pub mod digest;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use digest::create_digest_router;
pub use error::{ApiError, ErrorResponse};
pub use middleware::{cors_layer, request_logging_middleware, REQUEST_ID_HEADER};
pub use routes::create_router;
pub use shutdown::shutdown_signal;
pub use state::ServiceState;
