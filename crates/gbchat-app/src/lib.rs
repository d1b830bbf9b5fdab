//! gbchat application library
//!
//! Wires the CLI, the prompt file, the transcript, the HTTP transport and
//! the terminal into one session, and picks the mode from the TURNS
//! argument: negative runs until `/exit`, zero sends the prompt file once,
//! positive stops after that many turns.

use anyhow::{Context, Result};
use std::sync::Arc;

pub mod app;
pub mod cli;
pub mod console;
pub mod prompt;
pub mod signal;

pub use app::{
    run_single_shot, setup_from_cli, AppConfig, SessionController, SessionSummary, TerminationReason,
    TurnBudget,
};
pub use cli::Cli;
pub use console::{Console, InputEvent, ScriptedConsole, TerminalConsole};
pub use signal::InterruptFlag;

use gbchat_chat::{ChatClient, ExchangeOutcome, SessionContext};
use gbchat_llm_api::{ReqwestTransport, Transport};
use gbchat_logging::TranscriptLogger;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Mode 0 made its one exchange
    SingleShot(ExchangeOutcome),
    /// Mode 0 had nothing to send
    EmptyPrompt,
    /// The interactive loop ended
    Session(SessionSummary),
}

/// Run gbchat with the real terminal, HTTP client and Ctrl-C handling
pub async fn run(cli: Cli) -> Result<RunOutcome> {
    let config = setup_from_cli(&cli)?;
    let transport = ReqwestTransport::new().context("Failed to build HTTP client")?;
    let mut console =
        TerminalConsole::new(config.typewriter_delay).context("Failed to initialize line editor")?;

    let interrupt = InterruptFlag::new();
    let ctrl_c = interrupt.install_ctrl_c_handler();
    let outcome = run_with(config, Arc::new(transport), &mut console, interrupt).await;
    ctrl_c.abort();

    Ok(outcome)
}

/// Run gbchat with the given collaborators; nothing here can fail.
pub async fn run_with<C: Console>(
    config: AppConfig,
    transport: Arc<dyn Transport>,
    console: &mut C,
    interrupt: InterruptFlag,
) -> RunOutcome {
    match &config.log_target {
        Some(path) => console.print_line(&format!("Log will be saved to: {}", path.display())),
        None => console.print_line("Logging disabled"),
    }

    let system_prompt = prompt::load_prompt(&config.prompt_file);
    let logger = TranscriptLogger::new(config.log_target.clone());
    log_startup(&logger, &config);

    let mut ctx = SessionContext::with_system_prompt(&system_prompt, logger.clone());
    let client = ChatClient::new(config.client_config.clone(), config.api_key.clone(), transport);

    let outcome = match config.budget {
        TurnBudget::SingleShot => {
            match run_single_shot(&client, &mut ctx, console, &system_prompt, &config.ai_name).await {
                Some(outcome) => RunOutcome::SingleShot(outcome),
                None => return RunOutcome::EmptyPrompt,
            }
        }
        budget => {
            if let TurnBudget::Limited(turns) = budget {
                console.print_line(&format!("Will run {} dialogue turns", turns));
            }
            let mut session =
                SessionController::new(client, ctx, &mut *console, budget, config.ai_name.clone(), interrupt);
            RunOutcome::Session(session.run().await)
        }
    };

    logger.log("Program ended normally");
    outcome
}

fn log_startup(logger: &TranscriptLogger, config: &AppConfig) {
    logger.log("Program started");
    logger.log(&format!("Turns parameter: {}", config.turns));
    logger.log(&format!("Prompt file: {}", config.prompt_file.display()));
    logger.log(&format!("AI name: {}", config.ai_name));
    logger.log(&format!(
        "Log file: {}",
        config
            .log_target
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "disabled".to_string())
    ));
}
