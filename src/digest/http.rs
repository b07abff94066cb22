//! HTTP client for the remote digest service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ConfigError;
use crate::types::ContentDigest;
use super::{DigestClient, DigestError, DigestRequest, DigestResponse};

/// Digest client backed by the remote digest service.
///
/// Every call is a single `POST` bounded by the configured timeout. The
/// underlying connection pool is shared across clones.
#[derive(Debug, Clone)]
pub struct HttpDigestClient {
    client: Client,
    endpoint: String,
}

impl HttpDigestClient {
    /// Create a client for `endpoint` (e.g. `http://localhost:8081/hash`).
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// The digest service endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DigestClient for HttpDigestClient {
    async fn compute_digest(&self, text: &str) -> Result<ContentDigest, DigestError> {
        let request = DigestRequest { text: text.to_string() };

        let response = self.client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| DigestError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                "Digest service rejected request"
            );
            return Err(DigestError::BadStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DigestError::Unreachable(e.to_string()))?;

        let decoded: DigestResponse = serde_json::from_slice(&body)
            .map_err(|e| DigestError::Decode(e.to_string()))?;

        if decoded.digest.is_empty() {
            return Err(DigestError::Decode("empty digest".to_string()));
        }

        Ok(ContentDigest::new(decoded.digest))
    }
}
