//! Digest Service Binary
//!
//! Stateless SHA-256 service consumed by the notary.
//!
//! ## Configuration
//!
//! - `PORT`: Service port (default: 8081)
//! - `HOST`: Service host (default: 0.0.0.0)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" or "pretty" (default: json)

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use document_notary::config::DigestServiceConfig;
use document_notary::service::{create_digest_router, shutdown_signal};
use document_notary::telemetry::init_tracing;

const DEFAULT_LOG_FILTER: &str = "digest_service=info,document_notary=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DigestServiceConfig::from_env()?;

    init_tracing(config.log_format, DEFAULT_LOG_FILTER);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Digest Service");

    let app = create_digest_router().layer(TraceLayer::new_for_http());

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!(address = %addr, "Digest Service listening");
    info!("Endpoints: POST /hash, GET /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Digest Service shutdown complete");

    Ok(())
}
