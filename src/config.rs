//! User configuration.
//!
//! Settings are layered: built-in defaults, then `~/.todo/config.json`
//! (or the file given with `--config`), then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use scheduled_todo::fields::Filter;

pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "todo.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter selected when the UI starts.
    pub default_filter: Filter,
    /// Log level used when `TODO_LOG` is not set.
    pub log_level: String,
    /// Log destination; defaults to `todo.log` beside the config file.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_filter: Filter::All,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// A missing file yields the defaults. An unreadable or malformed file is
    /// reported on stderr and also yields the defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }
        match fs::read_to_string(path) {
            Ok(buf) => match serde_json::from_str(&buf) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error parsing config {}, using defaults: {e}", path.display());
                    Config::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading config {}, using defaults: {e}", path.display());
                Config::default()
            }
        }
    }

    /// Where log output goes for a config loaded from `config_path`.
    pub fn log_path(&self, config_path: &Path) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            config_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(LOG_FILE)
        })
    }
}

/// The per-user configuration directory, `$HOME/.todo`.
pub fn config_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".todo")
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("scheduled_todo_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = scratch_dir("missing").join("nope.json");
        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = scratch_dir("partial").join(CONFIG_FILE);
        fs::write(&path, r#"{ "default_filter": "thisweek" }"#).unwrap();

        let config = Config::load(&path);
        assert_eq!(config.default_filter, Filter::ThisWeek);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_path(&path), path.parent().unwrap().join(LOG_FILE));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = scratch_dir("malformed").join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load(&path), Config::default());
    }
}
