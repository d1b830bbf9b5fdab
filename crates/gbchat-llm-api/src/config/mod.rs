use std::time::Duration;

/// Default DeepSeek chat-completions endpoint
pub const DEEPSEEK_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// Model identifier sent with every request unless overridden
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Sampling temperature sent with every request
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Upper bound on generated tokens per reply
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Fixed parameters of every chat-completion request in a session
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEEPSEEK_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Normalize API URL by ensuring it has the correct path for OpenAI-compatible endpoints
pub fn normalize_api_url(url: &str) -> String {
    // If URL already contains a path with "completions", use it as-is
    if url.contains("/completions") || url.contains("/chat") {
        return url.to_string();
    }

    // If URL ends with a slash, append path without leading slash
    if url.ends_with('/') {
        format!("{}v1/chat/completions", url)
    } else {
        // Append the standard OpenAI-compatible path
        format!("{}/v1/chat/completions", url)
    }
}
