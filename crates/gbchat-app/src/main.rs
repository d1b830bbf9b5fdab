use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use gbchat::Cli;

/// Diagnostics go to stderr, filtered by GBCHAT_LOG (warn by default, debug with --verbose)
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("GBCHAT_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("Warning: failed to initialize diagnostics: {}", e);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too
            let code = if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
            if let Err(print_err) = e.print() {
                eprintln!("{}", print_err);
            }
            return code;
        }
    };

    init_tracing(cli.verbose);

    match gbchat::run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{} {:#}", "Program execution error:".red(), e);
            ExitCode::FAILURE
        }
    }
}
