//! File logging setup
//!
//! Log lines go to `~/.debtop/debtop.log` so they never interleave with the
//! statistics table on stdout.

use std::fs::OpenOptions;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Paths;

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "DEBTOP_LOG";

/// Filter directive for the given `-v` count
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber writing to the log file
///
/// Returns `None` when the log file cannot be opened; the program then runs
/// without logging. The returned guard must be held until exit so buffered
/// lines are flushed.
pub fn init(paths: &Paths, verbose: u8) -> Option<WorkerGuard> {
    paths.ensure_dirs().ok()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_file)
        .ok()?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .ok()?;

    Some(guard)
}
