use async_trait::async_trait;
use std::time::Instant;
use tracing::debug;

use crate::client::{Transport, TransportError, TransportRequest, TransportResponse};

/// HTTP transport backed by a shared `reqwest::Client`
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let TransportRequest {
            endpoint,
            api_key,
            body,
            timeout,
        } = request;

        let started = Instant::now();
        let response = self.client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .timeout(timeout)
            .body(body)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(e, timeout))?;
        debug!(%endpoint, status, elapsed_ms = started.elapsed().as_millis() as u64, "transport call finished");

        Ok(TransportResponse { status, body })
    }
}

fn classify(err: reqwest::Error, timeout: std::time::Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Http(err.to_string())
    }
}
