//! # gbchat-llm-api
//!
//! Wire format and transport for OpenAI-compatible chat-completion APIs
//! (DeepSeek by default).
//!
//! ## Features
//!
//! - **Transport seam**: the [`Transport`] trait treats one HTTP call as an
//!   atomic request/response; [`ReqwestTransport`] is the real one and
//!   [`ScriptedTransport`] replays canned responses.
//! - **Wire types**: [`ChatRequest`] / [`ChatResponse`] for the
//!   `/v1/chat/completions` JSON shape.
//! - **Configuration**: [`ClientConfig`] with the default endpoint, model,
//!   sampling temperature, output size and timeout.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gbchat_llm_api::{ClientConfig, ReqwestTransport, Transport, TransportRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::default();
//!     let transport = ReqwestTransport::new()?;
//!
//!     let response = transport
//!         .send(TransportRequest {
//!             endpoint: config.api_url.clone(),
//!             api_key: "your-api-key".to_string(),
//!             body: r#"{"model":"deepseek-chat","messages":[]}"#.to_string(),
//!             timeout: config.timeout,
//!         })
//!         .await?;
//!     println!("{}: {}", response.status, response.body);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;


// Re-export commonly used types
pub use client::{
    ChatRequest,
    ChatResponse,
    Choice,
    ResponseMessage,
    Transport,
    TransportError,
    TransportRequest,
    TransportResponse,
};
pub use client::reqwest_transport::ReqwestTransport;
pub use client::scripted::{completion_body, ScriptedTransport};

pub use config::{
    ClientConfig,
    DEEPSEEK_API_URL,
    DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT,
    normalize_api_url,
};
