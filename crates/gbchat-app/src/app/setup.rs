use anyhow::{ensure, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use gbchat_llm_api::{normalize_api_url, ClientConfig};

/// Log-file arguments that turn the transcript off (compared case-insensitively)
pub const LOG_DISABLED_SENTINELS: [&str; 3] = ["", "none", "null"];

/// How many dialogue turns a run may take, from the signed TURNS argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnBudget {
    /// Negative: run until /exit, Ctrl-C or end of input
    Unbounded,
    /// Zero: send the prompt file once, no interactive loop
    SingleShot,
    /// Positive: stop after this many turns
    Limited(u64),
}

impl TurnBudget {
    pub fn from_turns(turns: i64) -> Self {
        match turns {
            0 => TurnBudget::SingleShot,
            n if n < 0 => TurnBudget::Unbounded,
            n => TurnBudget::Limited(n.unsigned_abs()),
        }
    }

    pub fn is_exhausted(&self, turn_count: u64) -> bool {
        matches!(self, TurnBudget::Limited(max) if turn_count >= *max)
    }

    /// Text used in the session banner
    pub fn describe(&self) -> String {
        match self {
            TurnBudget::Limited(max) => max.to_string(),
            TurnBudget::Unbounded | TurnBudget::SingleShot => "unlimited".to_string(),
        }
    }
}

/// `None` when the argument is one of [`LOG_DISABLED_SENTINELS`]
pub fn log_target_from_arg(raw: &str) -> Option<PathBuf> {
    if LOG_DISABLED_SENTINELS
        .iter()
        .any(|sentinel| raw.eq_ignore_ascii_case(sentinel))
    {
        None
    } else {
        Some(PathBuf::from(raw))
    }
}

/// Application configuration derived from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub turns: i64,
    pub budget: TurnBudget,
    pub prompt_file: PathBuf,
    pub api_key: String,
    pub ai_name: String,
    pub log_target: Option<PathBuf>,
    pub client_config: ClientConfig,
    pub typewriter_delay: Duration,
}

/// Set up application configuration from CLI arguments
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    ensure!(cli.timeout_secs > 0, "--timeout-secs must be greater than zero");

    let defaults = ClientConfig::default();
    let api_url = match cli.api_url.as_deref().map(str::trim) {
        Some(url) => {
            ensure!(!url.is_empty(), "--api-url must not be empty");
            normalize_api_url(url)
        }
        None => defaults.api_url,
    };
    let model = match cli.model.as_deref().map(str::trim) {
        Some(model) => {
            ensure!(!model.is_empty(), "--model must not be empty");
            model.to_string()
        }
        None => defaults.model,
    };

    let client_config = ClientConfig {
        api_url,
        model,
        timeout: Duration::from_secs(cli.timeout_secs),
        ..defaults
    };

    Ok(AppConfig {
        turns: cli.turns,
        budget: TurnBudget::from_turns(cli.turns),
        prompt_file: cli.prompt_file.clone(),
        api_key: cli.api_key.clone(),
        ai_name: cli.ai_name.clone(),
        log_target: log_target_from_arg(&cli.log_file),
        client_config,
        typewriter_delay: Duration::from_millis(cli.typewriter_delay_ms),
    })
}
