use serde::Serialize;

use crate::analyze::Analysis;
use crate::cache::CacheEntryStatus;
use crate::error::Result;

#[derive(Serialize)]
struct RankedRow<'a> {
    rank: usize,
    package: &'a str,
    files: u64,
}

#[derive(Serialize)]
struct Statistics<'a> {
    architecture: &'a str,
    last_modified: &'a str,
    cached: bool,
    packages: Vec<RankedRow<'a>>,
}

/// Format the ranked packages as JSON
pub fn format_statistics(analysis: &Analysis, show_count: usize) -> Result<String> {
    let packages = analysis
        .top(show_count)
        .iter()
        .enumerate()
        .map(|(i, entry)| RankedRow {
            rank: i + 1,
            package: &entry.package,
            files: entry.files,
        })
        .collect();

    format_json(&Statistics {
        architecture: analysis.architecture.as_str(),
        last_modified: &analysis.entry.last_modified,
        cached: analysis.from_cache,
        packages,
    })
}

/// Format cache status as JSON
pub fn format_cache_status(location: &str, entries: &[CacheEntryStatus]) -> Result<String> {
    let entries: Vec<_> = entries
        .iter()
        .map(|entry| {
            serde_json::json!({
                "architecture": entry.architecture,
                "last_modified": entry.last_modified,
                "count": entry.count,
            })
        })
        .collect();

    format_json(&serde_json::json!({
        "cache_file": location,
        "entries": entries,
    }))
}

/// Format any serializable value as JSON
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::Architecture;
    use crate::cache::CacheEntry;
    use crate::contents::PackageCount;

    #[test]
    fn test_format_statistics_truncates_and_ranks() {
        let analysis = Analysis {
            architecture: Architecture::UdebAll,
            entry: CacheEntry {
                last_modified: "tok".to_string(),
                packages: vec![
                    PackageCount::new("a", 9),
                    PackageCount::new("b", 4),
                    PackageCount::new("c", 1),
                ]
                .into(),
            },
            from_cache: true,
        };

        let json = format_statistics(&analysis, 2).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["architecture"], "udeb-all");
        assert_eq!(value["last_modified"], "tok");
        assert_eq!(value["cached"], true);
        assert_eq!(value["packages"].as_array().unwrap().len(), 2);
        assert_eq!(value["packages"][1]["rank"], 2);
        assert_eq!(value["packages"][1]["package"], "b");
        assert_eq!(value["packages"][1]["files"], 4);
    }

    #[test]
    fn test_format_cache_status() {
        let entries = vec![CacheEntryStatus {
            architecture: "armel".to_string(),
            last_modified: "x".to_string(),
            count: 30,
        }];
        let value: serde_json::Value =
            serde_json::from_str(&format_cache_status("/c.json", &entries).unwrap()).unwrap();

        assert_eq!(value["cache_file"], "/c.json");
        assert_eq!(value["entries"][0]["architecture"], "armel");
        assert_eq!(value["entries"][0]["count"], 30);
    }
}
