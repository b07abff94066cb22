//! Notary Service Binary
//!
//! Runs the notary as a REST API service:
//! - Structured JSON logging (or pretty logs for development)
//! - Request tracing with correlation IDs
//! - Graceful shutdown handling
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DIGEST_SERVICE_URL`: remote digest endpoint (default: http://localhost:8081/hash,
//!   `HASHER_SERVICE_URL` is accepted as an alias)
//! - `DIGEST_TIMEOUT_MS`: digest call timeout (default: 5000)
//! - `DIGEST_MODE`: "remote" or "local" (default: remote)
//! - `PORT`: Service port (default: 8082)
//! - `HOST`: Service host (default: 0.0.0.0)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! ## Usage
//!
//! ```bash
//! DIGEST_SERVICE_URL=http://localhost:8081/hash cargo run --bin notary_service
//! ```

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use document_notary::config::{DigestMode, NotaryConfig};
use document_notary::digest::{HttpDigestClient, LocalDigester};
use document_notary::service::{create_router, shutdown_signal, ServiceState};
use document_notary::store::InMemoryRecordStore;
use document_notary::telemetry::init_tracing;

const DEFAULT_LOG_FILTER: &str = "notary_service=info,document_notary=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = NotaryConfig::from_env()?;

    init_tracing(config.log_format, DEFAULT_LOG_FILTER);

    let version = env!("CARGO_PKG_VERSION");
    let build_sha = option_env!("BUILD_SHA").unwrap_or("dev");

    info!(
        version = version,
        build_sha = build_sha,
        "Starting Notary Service"
    );

    let store = InMemoryRecordStore::new();

    let app: Router = match config.digest_mode {
        DigestMode::Remote => {
            let client = HttpDigestClient::new(&config.digest_service_url, config.digest_timeout)?;
            info!(
                endpoint = %client.endpoint(),
                timeout_ms = config.digest_timeout.as_millis() as u64,
                "Using remote digest service"
            );
            create_router(ServiceState::new(store, client))
        }
        DigestMode::Local => {
            info!("Using in-process digests");
            create_router(ServiceState::new(store, LocalDigester::new()))
        }
    };

    let app = app.layer(TraceLayer::new_for_http());

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!(
        address = %addr,
        digest_mode = %config.digest_mode,
        "Notary Service listening"
    );
    info!("Endpoints: POST /seal, POST /verify, POST /resolve, GET /list, GET /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Notary Service shutdown complete");

    Ok(())
}
