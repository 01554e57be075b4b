use colored::Colorize;

use crate::analyze::Analysis;
use crate::cache::CacheEntryStatus;
use crate::contents::PackageCount;

const PACKAGE_HEADER: &str = "PACKAGE";
const FILES_HEADER: &str = "ASSOCIATED FILES";

/// Gap between the longest package name and the count column
const COLUMN_GAP: usize = 4;

/// Format the ranked packages as a numbered table
pub fn format_statistics(analysis: &Analysis, show_count: usize) -> String {
    format_packages(analysis.top(show_count))
}

/// Numbered, aligned table of packages and their file counts
pub fn format_packages(packages: &[PackageCount]) -> String {
    if packages.is_empty() {
        return "No packages found.".to_string();
    }

    // "10. " is wider than "9. ", so the rank column is padded to the widest.
    let rank_width = packages.len().to_string().len() + 2;
    let name_width = packages
        .iter()
        .map(|entry| entry.package.chars().count())
        .max()
        .unwrap_or(0)
        .max(PACKAGE_HEADER.len());

    let mut output = String::new();
    let header = format!("{:<name_width$}", PACKAGE_HEADER);
    output.push_str(&format!(
        "{}{}{}{}\n",
        " ".repeat(rank_width),
        header.red().bold(),
        " ".repeat(COLUMN_GAP),
        FILES_HEADER.red().bold(),
    ));
    output.push_str(&"─".repeat(rank_width + name_width + COLUMN_GAP + FILES_HEADER.len()));
    output.push('\n');

    for (i, entry) in packages.iter().enumerate() {
        let rank = format!("{:<rank_width$}", format!("{}.", i + 1));
        let name = format!("{:<name_width$}", entry.package);
        let row = format!("{name}{}{}", " ".repeat(COLUMN_GAP), entry.files);
        // Alternate row shading for readability
        let row = if i % 2 == 1 { row.dimmed() } else { row.normal() };
        output.push_str(&format!("{}{}\n", rank.red(), row));
    }

    output.trim_end().to_string()
}

/// Format cache status for pretty output
pub fn format_cache_status(location: &str, entries: &[CacheEntryStatus]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Cache Status".bold()));
    output.push_str(&format!("Location: {location}\n\n"));

    if entries.is_empty() {
        output.push_str(&format!("  {}\n", "Not cached".dimmed()));
        return output.trim_end().to_string();
    }

    for entry in entries {
        output.push_str(&format!("{}\n", entry.architecture.bold()));
        output.push_str(&format!("  {} {}\n", "Packages:".cyan(), entry.count));
        let token = if entry.last_modified.is_empty() {
            "(unknown)".dimmed().to_string()
        } else {
            entry.last_modified.clone()
        };
        output.push_str(&format!("  {} {}\n", "Last modified:".cyan(), token));
    }

    output.trim_end().to_string()
}
