use colored::Colorize;
use thiserror::Error;
use tracing::debug;

use crate::app::setup::TurnBudget;
use crate::console::{Console, ConsoleError, InputEvent};
use crate::signal::InterruptFlag;
use gbchat_chat::{ChatClient, SessionContext};

const RULE_WIDTH: usize = 50;

/// Why the interactive session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    TurnLimitReached,
    ExitRequested,
    Interrupted,
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub reason: TerminationReason,
    pub turn_count: u64,
}

/// A fault inside one iteration; reported and survived
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Console(#[from] ConsoleError),
}

/// Result of one iteration of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Terminate(TerminationReason),
}

/// Control commands recognised at the prompt (trimmed, any case)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Exit,
    Clear,
    Log,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("/exit") {
            Some(Command::Exit)
        } else if input.eq_ignore_ascii_case("/clear") {
            Some(Command::Clear)
        } else if input.eq_ignore_ascii_case("/log") {
            Some(Command::Log)
        } else {
            None
        }
    }
}

/// Interactive dialogue loop: reads a line, runs a command or an exchange,
/// and enforces the turn budget.
pub struct SessionController<C: Console> {
    client: ChatClient,
    ctx: SessionContext,
    console: C,
    budget: TurnBudget,
    ai_name: String,
    interrupt: InterruptFlag,
    turn_count: u64,
}

impl<C: Console> SessionController<C> {
    pub fn new(
        client: ChatClient,
        ctx: SessionContext,
        console: C,
        budget: TurnBudget,
        ai_name: impl Into<String>,
        interrupt: InterruptFlag,
    ) -> Self {
        Self {
            client,
            ctx,
            console,
            budget,
            ai_name: ai_name.into(),
            interrupt,
            turn_count: 0,
        }
    }

    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Run until a terminating event. Faults inside an iteration are logged,
    /// shown and survived.
    pub async fn run(&mut self) -> SessionSummary {
        self.announce_start();

        loop {
            if self.interrupt.is_raised() {
                let reason = self.interrupted();
                return self.finish(reason);
            }

            match self.step().await {
                Ok(Step::Continue) => {}
                Ok(Step::Terminate(reason)) => return self.finish(reason),
                Err(e) => {
                    self.ctx.logger.error(&format!("Unexpected error: {}", e));
                    self.console
                        .print_line(&format!("\n{} {}", "An error occurred:".red(), e));
                }
            }
        }
    }

    /// One iteration: budget check, one read, then a command or an exchange.
    pub async fn step(&mut self) -> Result<Step, SessionError> {
        if let TurnBudget::Limited(max) = self.budget {
            if self.budget.is_exhausted(self.turn_count) {
                let message = format!("Reached maximum dialogue turns ({}), exiting.", max);
                self.console.print_line(&format!("\n{}", message.yellow()));
                self.ctx.logger.log(&message);
                return Ok(Step::Terminate(TerminationReason::TurnLimitReached));
            }
        }

        let prompt = format!("\n[{}] {} ", self.turn_count + 1, "You:".bright_green().bold());
        let input = match self.console.read_line(&prompt)? {
            InputEvent::Line(line) => line,
            InputEvent::Interrupted => return Ok(Step::Terminate(self.interrupted())),
            InputEvent::Eof => {
                self.console.print_line("");
                self.ctx.logger.log("End of input reached.");
                return Ok(Step::Terminate(TerminationReason::EndOfInput));
            }
        };

        match Command::parse(&input) {
            Some(Command::Exit) => {
                self.console.print_line(&"Exiting...".bright_cyan().to_string());
                self.ctx.logger.log("User requested exit.");
                Ok(Step::Terminate(TerminationReason::ExitRequested))
            }
            Some(Command::Clear) => {
                self.ctx.history.clear_preserving_system();
                self.turn_count = 0;
                self.console
                    .print_line(&"Dialogue history cleared!".green().to_string());
                self.ctx.logger.log("Dialogue history cleared.");
                Ok(Step::Continue)
            }
            Some(Command::Log) => {
                let report = match self.ctx.logger.target() {
                    Some(path) => format!("Log file location: {}", path.display()),
                    None => "Log file not configured.".to_string(),
                };
                self.console.print_line(&report);
                self.ctx.logger.log(&report);
                Ok(Step::Continue)
            }
            None => {
                self.console.print_inline(&format!(
                    "\n[{}] {}: ",
                    self.turn_count + 1,
                    self.ai_name.bright_magenta().bold()
                ));
                let outcome = self.client.exchange(&mut self.ctx, &input).await;
                if outcome.is_reply() {
                    self.console.typewrite(outcome.text());
                } else {
                    self.console.typewrite(&outcome.text().red().to_string());
                }
                self.turn_count += 1;
                debug!(turn = self.turn_count, ok = outcome.is_reply(), "turn finished");

                if self.interrupt.is_raised() {
                    return Ok(Step::Terminate(self.interrupted()));
                }
                Ok(Step::Continue)
            }
        }
    }

    fn announce_start(&mut self) {
        let rule = "=".repeat(RULE_WIDTH);
        self.ctx.logger.log(&rule);
        self.ctx.logger.log("Chat session started");
        self.ctx.logger.log(&format!("AI Name: {}", self.ai_name));
        self.ctx.logger.log(&format!("Max turns: {}", self.budget.describe()));
        self.ctx.logger.log(&rule);

        self.console.print_line(&rule);
        self.console.print_line(&"Type /exit to quit".bright_black().to_string());
        self.console
            .print_line(&"Type /clear to clear dialogue history".bright_black().to_string());
        self.console
            .print_line(&"Type /log to show the log file location".bright_black().to_string());
        self.console.print_line(&rule);
    }

    fn interrupted(&mut self) -> TerminationReason {
        self.console.print_line(&format!(
            "\n\n{}",
            "Program interrupted by user, exiting...".bright_yellow()
        ));
        self.ctx.logger.log("Program interrupted by user.");
        TerminationReason::Interrupted
    }

    fn finish(&self, reason: TerminationReason) -> SessionSummary {
        debug!(?reason, turns = self.turn_count, "session finished");
        SessionSummary {
            reason,
            turn_count: self.turn_count,
        }
    }
}
