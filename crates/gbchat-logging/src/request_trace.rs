use std::time::Duration;
use tracing::debug;

use crate::safe_truncate;

const MAX_TRACED_BODY_CHARS: usize = 2000;

/// Show only the first few characters of a credential.
pub fn mask_api_key(api_key: &str) -> String {
    let visible = (api_key.chars().count() / 4).min(6);
    format!("{}***", api_key.chars().take(visible).collect::<String>())
}

/// Trace an outgoing HTTP request (enabled with `GBCHAT_LOG=debug` or `--verbose`)
pub fn trace_request(url: &str, body: &str, api_key: &str) {
    debug!(
        url,
        authorization = %format!("Bearer {}", mask_api_key(api_key)),
        body = %safe_truncate(body, MAX_TRACED_BODY_CHARS),
        "sending chat completion request"
    );
}

/// Trace the HTTP response that came back for a request
pub fn trace_response(status: u16, body: &str, elapsed: Duration) {
    debug!(
        status,
        elapsed_ms = elapsed.as_millis() as u64,
        body = %safe_truncate(body, MAX_TRACED_BODY_CHARS),
        "received chat completion response"
    );
}
