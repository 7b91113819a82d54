//! Tracing setup.
//!
//! The terminal UI owns stdout, so events are written to a log file. The
//! filter comes from `TODO_LOG` when set, otherwise from the configured level.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TODO_LOG";

/// Install a file-backed subscriber. Failing to open the log file disables
/// logging instead of aborting, and a second call is a no-op.
pub fn install_tracing(level: &str, log_path: &Path) {
    if let Some(parent) = log_path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(log_path) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_target(false)
        .compact()
        .try_init();
}
