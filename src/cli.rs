use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Keyboard-driven task list.
/// Tasks live in memory for the length of a session; nothing is saved.
#[derive(Parser)]
#[command(name = "todo", version, about = "Terminal task list")]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log file path (default: $TMPDIR/tasklist.log).
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    // Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
