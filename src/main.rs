//! # todo - terminal task list
//!
//! A keyboard-driven task list. Add, edit, complete, delete and filter short
//! text tasks in an interactive terminal UI, or drive the same store from a
//! script for automation.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive list
//! todo
//!
//! # Start on the incomplete tasks
//! todo ui --filter incomplete
//!
//! # Headless: one intent per line, view printed at the end
//! printf 'add Buy milk\nadd Walk dog\ntoggle 1\n' | todo run
//! todo run plan.txt --format json
//! ```
//!
//! Tasks live in memory for the length of a session; nothing is written to
//! disk apart from the log file (`$TMPDIR/tasklist.log` by default).
//!
//! ## Configuration
//!
//! Optional TOML file at `<config_dir>/tasklist/config.toml` or `--config`:
//!
//! ```toml
//! [ui]
//! poll_timeout_ms = 50
//! default_filter = "all"
//!
//! [log]
//! level = "info"
//! file = "/tmp/tasklist.log"
//! ```

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod fields;
pub mod intent;
pub mod logging;
pub mod script;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::Config;
use logging::init_logging;

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let _log_guard = match init_logging(&config.log_level, &config.log_file) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    match cli.command.unwrap_or(Commands::Ui { filter: None }) {
        Commands::Ui { filter } => cmd_ui(&config, filter),
        Commands::Run { script, format, filter } => cmd_run(&config, script, format, filter),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
