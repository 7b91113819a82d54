use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Scheduled todo list with due dates and a terminal UI.
/// Tasks live in memory for the lifetime of the session.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Scheduled todo list")]
pub struct Cli {
    /// Path to the JSON config file (defaults to ~/.todo/config.json).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs here instead of the configured log file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;
    use scheduled_todo::fields::Filter;

    #[test]
    fn no_subcommand_means_ui() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn ui_filter_accepts_both_spellings() {
        for selector in ["this-week", "thisweek"] {
            let cli = Cli::try_parse_from(["todo", "ui", "--filter", selector]).unwrap();
            assert!(matches!(
                cli.command,
                Some(Commands::Ui { filter: Some(Filter::ThisWeek) })
            ));
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["todo", "ui", "--config", "/tmp/c.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
    }

    #[test]
    fn completions_takes_a_shell() {
        let cli = Cli::try_parse_from(["todo", "completions", "bash"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Completions { shell: Shell::Bash })));
        assert!(Cli::try_parse_from(["todo", "completions", "tcsh"]).is_err());
    }
}
