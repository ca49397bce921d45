//! Command implementations for the CLI interface.
//!
//! Each subcommand builds a fresh in-memory store and hands it to one of the
//! renderers: the interactive TUI or the headless script runner.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::{error, info};

use crate::config::Config;
use crate::fields::{filter_name, Filter};
use crate::script::{run_script, OutputFormat, ScriptError};
use crate::store::TaskStore;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive task list (default).
    Ui {
        /// Initial filter: all | completed | incomplete.
        #[arg(long, value_enum)]
        filter: Option<Filter>,
    },

    /// Apply a script of task intents and print the resulting list.
    Run {
        /// Script file, one intent per line. Reads stdin when omitted or "-".
        script: Option<PathBuf>,
        /// Output format for printed views.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Initial filter: all | completed | incomplete.
        #[arg(long, value_enum)]
        filter: Option<Filter>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Run the interactive UI.
pub fn cmd_ui(config: &Config, filter: Option<Filter>) {
    let filter = filter.unwrap_or(config.default_filter);
    info!(filter = filter_name(filter), "launching ui");
    if let Err(e) = run_tui(config, filter) {
        error!("ui error: {e}");
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Run a script file (or stdin) against an empty store.
pub fn cmd_run(config: &Config, script: Option<PathBuf>, format: OutputFormat, filter: Option<Filter>) {
    let filter = filter.unwrap_or(config.default_filter);
    if let Err(e) = run_script_source(script, format, filter) {
        error!("script failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_script_source(
    script: Option<PathBuf>,
    format: OutputFormat,
    filter: Filter,
) -> Result<(), ScriptError> {
    let input: Box<dyn BufRead> = match script {
        Some(path) if path.as_os_str() != "-" => {
            info!(path = %path.display(), "running script");
            Box::new(BufReader::new(File::open(path)?))
        }
        _ => {
            info!("running script from stdin");
            Box::new(io::stdin().lock())
        }
    };

    let mut store = TaskStore::with_filter(filter);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_script(input, &mut out, &mut store, format)
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}
