use colored::Colorize;

use crate::console::Console;
use gbchat_chat::{ChatClient, ExchangeOutcome, SessionContext};

pub const EMPTY_PROMPT_ERROR: &str = "Prompt file is empty, cannot execute mode 0";

/// Send the prompt itself as the one and only user message.
///
/// The prompt is also the seeded system message, so the request carries it
/// twice. Returns `None` without contacting the API when the prompt is empty.
pub async fn run_single_shot<C: Console>(
    client: &ChatClient,
    ctx: &mut SessionContext,
    console: &mut C,
    prompt: &str,
    ai_name: &str,
) -> Option<ExchangeOutcome> {
    if prompt.is_empty() {
        console.print_line(&EMPTY_PROMPT_ERROR.red().to_string());
        ctx.logger.error(EMPTY_PROMPT_ERROR);
        return None;
    }

    console.print_line("Processing prompt file content...");
    console.print_inline(&format!("{} reply: ", ai_name.bright_magenta().bold()));
    let outcome = client.exchange(ctx, prompt).await;
    console.typewrite(outcome.text());

    Some(outcome)
}
