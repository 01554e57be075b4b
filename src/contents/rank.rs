//! Descending top-K selection over package file counts

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::parser::RawCounts;

/// A package and the number of files associated with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageCount {
    pub package: String,
    pub files: u64,
}

impl PackageCount {
    pub fn new(package: impl Into<String>, files: u64) -> Self {
        Self {
            package: package.into(),
            files,
        }
    }
}

/// Packages ordered by file count, highest first
///
/// Persisted as a JSON object whose key order is the rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedCounts(Vec<PackageCount>);

impl RankedCounts {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackageCount> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[PackageCount] {
        &self.0
    }

    /// The first `n` entries, or all of them if fewer are available
    pub fn top(&self, n: usize) -> &[PackageCount] {
        &self.0[..n.min(self.0.len())]
    }
}

impl From<Vec<PackageCount>> for RankedCounts {
    fn from(entries: Vec<PackageCount>) -> Self {
        Self(entries)
    }
}

impl<'a> IntoIterator for &'a RankedCounts {
    type Item = &'a PackageCount;
    type IntoIter = std::slice::Iter<'a, PackageCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Sort counts descending and keep the first `width` entries
///
/// Ties keep the order in which packages were first encountered.
pub fn select_top(counts: RawCounts, width: usize) -> RankedCounts {
    let mut entries = counts.into_entries();
    // sort_by is stable
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(width);

    RankedCounts(
        entries
            .into_iter()
            .map(|(package, files)| PackageCount { package, files })
            .collect(),
    )
}

impl Serialize for RankedCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.package, &entry.files)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RankedCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RankedVisitor;

        impl<'de> Visitor<'de> for RankedVisitor {
            type Value = RankedCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of package names to file counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((package, files)) = access.next_entry::<String, u64>()? {
                    entries.push(PackageCount { package, files });
                }
                Ok(RankedCounts(entries))
            }
        }

        deserializer.deserialize_map(RankedVisitor)
    }
}
