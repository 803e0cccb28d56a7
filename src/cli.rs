//! Command-line interface for tictactoe_rewind.

use clap::Parser;

/// Tic-Tac-Toe Rewind - local two-player game with move-history time travel
#[derive(Parser, Debug)]
#[command(name = "tictactoe_rewind")]
#[command(about = "Tic-tac-toe with time travel and a cross-match scoreboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log file path. Logs go to a file so they do not corrupt the TUI.
    #[arg(long, default_value = "tictactoe_rewind.log")]
    pub log_file: std::path::PathBuf,

    /// Log filter (tracing EnvFilter syntax), overrides RUST_LOG.
    #[arg(long)]
    pub log_filter: Option<String>,
}
