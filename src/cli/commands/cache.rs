//! Cache management commands

use colored::Colorize;

use crate::arch::Architecture;
use crate::cache::CacheStore;
use crate::cli::args::{CacheArgs, CacheCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::Result;
use crate::output;

/// Handle cache commands
pub fn cache(config: &Config, paths: &Paths, args: &CacheArgs, format: OutputFormat) -> Result<String> {
    let store = CacheStore::new(config.cache_file(paths));

    match &args.command {
        CacheCommands::Status => status(&store, format),
        CacheCommands::Clear { arch } => clear(&store, *arch, format),
    }
}

fn status(store: &CacheStore, format: OutputFormat) -> Result<String> {
    let entries = store.status()?;
    let location = store.path().display().to_string();
    output::format_cache_status(&location, &entries, format)
}

fn clear(store: &CacheStore, arch: Option<Architecture>, format: OutputFormat) -> Result<String> {
    let (message, removed) = match arch {
        Some(arch) => {
            let removed = store.remove(arch)?;
            let message = if removed {
                format!("{} Cleared cached statistics for {}", "✓".green(), arch)
            } else {
                format!("No cached statistics for {arch}")
            };
            (message, removed)
        }
        None => {
            store.clear()?;
            (format!("{} Cache cleared", "✓".green()), true)
        }
    };

    match format {
        OutputFormat::Pretty => Ok(message),
        OutputFormat::Json => output::json::format_json(&serde_json::json!({
            "status": if removed { "cleared" } else { "not_cached" },
            "architecture": arch.map(|a| a.as_str()),
        })),
    }
}
