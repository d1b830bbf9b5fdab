// Logging module - session transcript and request tracing
pub mod request_trace;
pub mod transcript_logger;

pub use request_trace::{mask_api_key, trace_request, trace_response};
pub use transcript_logger::{format_line, LogLevel, LoggerError, TranscriptLogger};

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}
