/// Result of one exchange. Failures are values, not errors: every variant
/// carries the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The filtered assistant reply, already appended to the history
    Reply(String),
    /// The API answered with a non-200 status
    ApiFailure { status: u16, message: String },
    /// No usable response: connection, timeout or unparseable body
    TransportFailure { message: String },
}

impl ExchangeOutcome {
    pub fn text(&self) -> &str {
        match self {
            ExchangeOutcome::Reply(text) => text,
            ExchangeOutcome::ApiFailure { message, .. } => message,
            ExchangeOutcome::TransportFailure { message } => message,
        }
    }

    pub fn is_reply(&self) -> bool {
        matches!(self, ExchangeOutcome::Reply(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_has_display_text() {
        let reply = ExchangeOutcome::Reply("Hi".to_string());
        let api = ExchangeOutcome::ApiFailure {
            status: 500,
            message: "API request failed, status code: 500".to_string(),
        };
        let transport = ExchangeOutcome::TransportFailure {
            message: "Request error: boom".to_string(),
        };

        assert_eq!(reply.text(), "Hi");
        assert_eq!(api.text(), "API request failed, status code: 500");
        assert_eq!(transport.text(), "Request error: boom");
        assert!(reply.is_reply());
        assert!(!api.is_reply());
    }
}
