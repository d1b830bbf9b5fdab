use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use gbchat_types::Message;

pub mod reqwest_transport;
pub mod scripted;

/// Chat-completion request body (OpenAI-compatible format)
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Chat-completion response body; only the fields gbchat reads
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, if the API sent one
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first()?.message.content.as_deref()
    }
}

/// One HTTP call: POST `body` as JSON to `endpoint` with a bearer credential
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub endpoint: String,
    pub api_key: String,
    pub body: String,
    pub timeout: Duration,
}

/// Whatever came back, successful status or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    /// Only a plain 200 counts as success
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// The call never produced a response
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

/// Request/response boundary to the chat-completion service.
///
/// Implementations do not retry; one call is one attempt.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
