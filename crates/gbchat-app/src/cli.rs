use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for gbchat
#[derive(Parser, Debug, Clone)]
#[command(name = "gbchat")]
#[command(about = "GB2312 chat client for OpenAI-compatible chat-completion APIs (DeepSeek by default)")]
#[command(version)]
pub struct Cli {
    /// Dialogue turns: negative runs until /exit, 0 sends the prompt file
    /// as a single message, positive stops after that many turns
    #[arg(value_name = "TURNS", allow_negative_numbers = true)]
    pub turns: i64,

    /// GB2312-encoded file holding the system prompt
    #[arg(value_name = "PROMPT_FILE")]
    pub prompt_file: PathBuf,

    /// API key sent as a bearer token
    #[arg(value_name = "API_KEY")]
    pub api_key: String,

    /// Name shown in front of every reply
    #[arg(value_name = "AI_NAME")]
    pub ai_name: String,

    /// Transcript file (GB2312); "", "none" or "null" disables logging
    #[arg(value_name = "LOG_FILE")]
    pub log_file: String,

    /// Chat-completions endpoint; a bare host gets /v1/chat/completions appended
    #[arg(long, env = "GBCHAT_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Model identifier sent with every request
    #[arg(long, env = "GBCHAT_MODEL", value_name = "MODEL")]
    pub model: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "GBCHAT_TIMEOUT_SECS", value_name = "SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Delay between characters of a reply; 0 prints replies at once
    #[arg(long, env = "GBCHAT_TYPEWRITER_DELAY_MS", value_name = "MS", default_value_t = 30)]
    pub typewriter_delay_ms: u64,

    /// Show request/response traces on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
