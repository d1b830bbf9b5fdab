pub mod repl;
pub mod setup;
pub mod single_shot;

pub use repl::{SessionController, SessionError, SessionSummary, Step, TerminationReason};
pub use setup::{log_target_from_arg, setup_from_cli, AppConfig, TurnBudget};
pub use single_shot::run_single_shot;
