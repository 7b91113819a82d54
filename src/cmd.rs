//! Command implementations for the CLI interface.

use anyhow::{Context, Result};
use clap::Subcommand;
use clap_complete::{generate, Shell};

use scheduled_todo::fields::Filter;

use crate::config::Config;
use crate::tui::run::run_tui;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive UI (the default).
    Ui {
        /// Initial filter: all | active | completed | overdue | today | this-week.
        #[arg(long, value_enum)]
        filter: Option<Filter>,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(config: &Config, filter: Option<Filter>) -> Result<()> {
    let filter = filter.unwrap_or(config.default_filter);
    run_tui(filter).context("terminal UI failed")
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
