use gbchat_logging::TranscriptLogger;
use gbchat_types::ConversationHistory;

/// Everything one session owns: the dialogue so far and where the transcript goes.
///
/// Passed by `&mut` into every exchange; there is no process-wide state.
#[derive(Debug, Default)]
pub struct SessionContext {
    pub history: ConversationHistory,
    pub logger: TranscriptLogger,
}

impl SessionContext {
    pub fn new(history: ConversationHistory, logger: TranscriptLogger) -> Self {
        Self { history, logger }
    }

    /// Seed with `system_prompt` (nothing when empty).
    pub fn with_system_prompt(system_prompt: &str, logger: TranscriptLogger) -> Self {
        Self::new(ConversationHistory::with_system_prompt(system_prompt), logger)
    }
}
