pub mod json;
pub mod pretty;

use crate::analyze::Analysis;
use crate::cache::CacheEntryStatus;
use crate::cli::OutputFormat;
use crate::error::Result;

/// Format analysis results based on output format
pub fn format_statistics(analysis: &Analysis, show_count: usize, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_statistics(analysis, show_count)),
        OutputFormat::Json => json::format_statistics(analysis, show_count),
    }
}

/// Format cache status based on output format
pub fn format_cache_status(
    location: &str,
    entries: &[CacheEntryStatus],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_cache_status(location, entries)),
        OutputFormat::Json => json::format_cache_status(location, entries),
    }
}
