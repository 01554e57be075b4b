use crate::analyze::Analyzer;
use crate::cache::CacheStore;
use crate::cli::args::{OutputFormat, TopArgs};
use crate::config::{Config, Paths};
use crate::error::Result;
use crate::mirror::MirrorClient;
use crate::output;
use crate::progress::TerminalReporter;

/// Handle the top command
pub fn top(
    config: &Config,
    paths: &Paths,
    args: &TopArgs,
    reporter: TerminalReporter,
    format: OutputFormat,
) -> Result<String> {
    let limits = config.limits(args.count.map(|n| n as usize));
    let store = CacheStore::new(config.cache_file(paths));
    let client = MirrorClient::new(&config.mirror.url)?;

    let analysis = Analyzer::new(&client, &store, limits, reporter)
        .force_refresh(args.refresh)
        .analyze(args.arch)?;

    output::format_statistics(&analysis, limits.show_count, format)
}
