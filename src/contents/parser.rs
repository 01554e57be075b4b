//! Contents index tokenizer and per-package file tally
//!
//! A Contents index starts with zero or more lines of free-form text, may
//! carry a `FILE LOCATION` header row, and then lists one file per line
//! followed by a comma-separated list of qualified package names. Lines that
//! do not fit that shape are ignored.

use std::collections::HashMap;
use std::io::BufRead;

use crate::error::Result;

/// File counts per package, remembering the order packages were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCounts {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl RawCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file association for `package`
    pub fn increment(&mut self, package: &str) {
        match self.index.get(package) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(package.to_string(), self.entries.len());
                self.entries.push((package.to_string(), 1));
            }
        }
    }

    /// Count for a package, if it was ever seen
    pub fn get(&self, package: &str) -> Option<u64> {
        self.index.get(package).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub(crate) fn into_entries(self) -> Vec<(String, u64)> {
        self.entries
    }
}

impl<'a> FromIterator<(&'a str, u64)> for RawCounts {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut counts = RawCounts::new();
        for (name, count) in iter {
            match counts.index.get(name) {
                Some(&slot) => counts.entries[slot].1 += count,
                None => {
                    counts.index.insert(name.to_string(), counts.entries.len());
                    counts.entries.push((name.to_string(), count));
                }
            }
        }
        counts
    }
}

/// Tally file associations for every package in a decompressed index
pub fn parse<R: BufRead>(mut reader: R) -> Result<RawCounts> {
    let mut counts = RawCounts::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        count_line(&line, &mut counts);
    }

    Ok(counts)
}

/// Apply a single index line to `counts`, skipping it if malformed
fn count_line(line: &[u8], counts: &mut RawCounts) {
    let tokens: Vec<&[u8]> = line
        .split(|&b| is_separator(b))
        .filter(|token| !token.is_empty())
        .collect();

    let Some((packages, path_tokens)) = tokens.split_last() else {
        return;
    };

    // Filenames are root-relative, so a real row always has a '/' before the
    // package column. This also rejects preamble text and the header row.
    if path_tokens.is_empty() || !path_tokens.iter().any(|token| token.contains(&b'/')) {
        return;
    }

    for package in packages.split(|&b| b == b',').filter(|name| !name.is_empty()) {
        counts.increment(&String::from_utf8_lossy(package));
    }
}

/// Whitespace as understood by the index format (ASCII only)
fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}
