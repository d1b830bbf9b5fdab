use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::warn;

use gbchat_llm_api::{ChatRequest, ChatResponse, ClientConfig, Transport, TransportError, TransportRequest};
use gbchat_logging::{trace_request, trace_response};

use crate::context::SessionContext;
use crate::outcome::ExchangeOutcome;

/// Why an exchange produced no reply. Never leaves [`ChatClient::exchange`].
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Performs chat-completion exchanges with fixed request parameters
pub struct ChatClient {
    config: ClientConfig,
    api_key: String,
    transport: Arc<dyn Transport>,
}

impl ChatClient {
    pub fn new(config: ClientConfig, api_key: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            api_key: api_key.into(),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `user_text` with the whole history as context.
    ///
    /// The user turn is stored unfiltered; the reply is filtered to the
    /// GB2312 repertoire before it is logged, stored and returned. On any
    /// failure the history gains no assistant message and the failure is
    /// reported through the returned outcome and the transcript.
    pub async fn exchange(&self, ctx: &mut SessionContext, user_text: &str) -> ExchangeOutcome {
        ctx.logger.log(&format!("User input: {}", user_text));
        ctx.history.push_user(user_text);

        match self.try_exchange(ctx).await {
            Ok(reply) => ExchangeOutcome::Reply(reply),
            Err(ChatError::Api { status, body }) => {
                ctx.logger.error(&format!(
                    "API request failed, status: {}, response: {}",
                    status, body
                ));
                ExchangeOutcome::ApiFailure {
                    status,
                    message: format!("API request failed, status code: {}", status),
                }
            }
            Err(e) => {
                warn!(error = %e, "chat exchange failed");
                ctx.logger.error(&format!("Request error: {}", e));
                ExchangeOutcome::TransportFailure {
                    message: format!("Request error: {}", e),
                }
            }
        }
    }

    async fn try_exchange(&self, ctx: &mut SessionContext) -> Result<String, ChatError> {
        let body = serde_json::to_string(&ChatRequest {
            model: &self.config.model,
            messages: ctx.history.snapshot(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        })?;

        let endpoint = self.config.api_url.clone();
        ctx.logger.log(&format!("Sending request to {}", endpoint));
        trace_request(&endpoint, &body, &self.api_key);

        let started = Instant::now();
        let response = self
            .transport
            .send(TransportRequest {
                endpoint,
                api_key: self.api_key.clone(),
                body,
                timeout: self.config.timeout,
            })
            .await?;
        trace_response(response.status, &response.body, started.elapsed());
        ctx.logger.log(&format!("Response status: {}", response.status));

        if !response.is_success() {
            return Err(ChatError::Api {
                status: response.status,
                body: response.body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&response.body)
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;
        let content = parsed
            .first_content()
            .ok_or_else(|| ChatError::MalformedResponse("no message content in first choice".to_string()))?;

        let reply = gbchat_encoding::filter(content);
        ctx.logger.log(&format!("AI response: {}", reply));
        ctx.history.push_assistant(reply.clone());

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbchat_llm_api::ScriptedTransport;
    use gbchat_logging::TranscriptLogger;
    use gbchat_types::Role;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn client_with(transport: Arc<ScriptedTransport>) -> ChatClient {
        ChatClient::new(ClientConfig::default(), "sk-test", transport)
    }

    fn roles(ctx: &SessionContext) -> Vec<Role> {
        ctx.history.snapshot().iter().map(|m| m.role()).collect()
    }

    #[tokio::test]
    async fn test_successful_exchange_appends_both_turns() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_reply("Hi there");
        let client = client_with(transport.clone());
        let mut ctx = SessionContext::with_system_prompt("Be brief", TranscriptLogger::disabled());

        let outcome = client.exchange(&mut ctx, "Hello").await;

        assert_eq!(outcome, ExchangeOutcome::Reply("Hi there".to_string()));
        assert_eq!(roles(&ctx), vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(ctx.history.snapshot()[2].content(), "Hi there");
    }

    #[tokio::test]
    async fn test_request_replays_full_history_with_fixed_parameters() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_reply("first").push_reply("second");
        let client = client_with(transport.clone());
        let mut ctx = SessionContext::with_system_prompt("rules", TranscriptLogger::disabled());

        client.exchange(&mut ctx, "one").await;
        client.exchange(&mut ctx, "two").await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        let sent: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({
                "model": "deepseek-chat",
                "messages": [
                    {"role": "system", "content": "rules"},
                    {"role": "user", "content": "one"},
                    {"role": "assistant", "content": "first"},
                    {"role": "user", "content": "two"}
                ],
                "temperature": 0.7,
                "max_tokens": 2000
            })
        );
        assert_eq!(requests[1].api_key, "sk-test");
        assert_eq!(requests[1].timeout, Duration::from_secs(60));
        assert_eq!(requests[1].endpoint, gbchat_llm_api::DEEPSEEK_API_URL);
    }

    #[tokio::test]
    async fn test_reply_is_filtered_but_user_text_is_not() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_reply("价格€5 😀");
        let client = client_with(transport.clone());
        let mut ctx = SessionContext::default();

        let outcome = client.exchange(&mut ctx, "多少钱€?").await;

        assert_eq!(outcome.text(), "价格 5  ");
        assert_eq!(ctx.history.snapshot()[0].content(), "多少钱€?");
        assert_eq!(ctx.history.snapshot()[1].content(), "价格 5  ");
    }

    #[tokio::test]
    async fn test_non_200_leaves_no_assistant_turn() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(429, r#"{"error":"rate limited"}"#);
        let client = client_with(transport.clone());
        let mut ctx = SessionContext::default();

        let outcome = client.exchange(&mut ctx, "Hello").await;

        assert_eq!(
            outcome,
            ExchangeOutcome::ApiFailure {
                status: 429,
                message: "API request failed, status code: 429".to_string(),
            }
        );
        assert_eq!(roles(&ctx), vec![Role::User]);
    }

    #[tokio::test]
    async fn test_transport_fault_becomes_text() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_error(TransportError::Timeout(Duration::from_secs(60)));
        let client = client_with(transport.clone());
        let mut ctx = SessionContext::default();

        let outcome = client.exchange(&mut ctx, "Hello").await;

        assert_eq!(
            outcome,
            ExchangeOutcome::TransportFailure {
                message: "Request error: request timed out after 60s".to_string(),
            }
        );
        assert_eq!(roles(&ctx), vec![Role::User]);
    }

    #[tokio::test]
    async fn test_200_without_content_is_a_parse_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_response(200, r#"{"choices":[]}"#)
            .push_response(200, "not json");
        let client = client_with(transport.clone());
        let mut ctx = SessionContext::default();

        let empty = client.exchange(&mut ctx, "a").await;
        let garbage = client.exchange(&mut ctx, "b").await;

        assert!(matches!(empty, ExchangeOutcome::TransportFailure { .. }));
        assert!(empty.text().starts_with("Request error: malformed response"));
        assert!(matches!(garbage, ExchangeOutcome::TransportFailure { .. }));
        assert_eq!(roles(&ctx), vec![Role::User, Role::User]);
    }
}
