//! # todo - Scheduled Todo List
//!
//! A terminal todo list with due dates, due times and due-window filters.
//!
//! ```bash
//! # Launch the UI with the configured default filter
//! todo
//!
//! # Start on the overdue tasks
//! todo ui --filter overdue
//!
//! # Shell completions
//! todo completions zsh > ~/.zfunc/_todo
//! ```
//!
//! Configuration is read from `~/.todo/config.json`; logs go to
//! `~/.todo/todo.log` and are filtered by `TODO_LOG` (e.g. `TODO_LOG=debug`).

use anyhow::Result;
use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod logging;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::{default_config_path, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        cmd_completions(shell);
        return Ok(());
    }

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load(&config_path);
    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| config.log_path(&config_path));
    logging::install_tracing(&config.log_level, &log_path);

    match cli.command {
        None => cmd_ui(&config, None),
        Some(Commands::Ui { filter }) => cmd_ui(&config, filter),
        Some(Commands::Completions { .. }) => unreachable!("completions handled above"),
    }
}
