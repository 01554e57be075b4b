//! Cache-or-download analysis of one architecture's Contents index

use crate::arch::Architecture;
use crate::cache::{self, CacheEntry, CacheStore};
use crate::config::Limits;
use crate::contents::{self, PackageCount};
use crate::error::Result;
use crate::mirror::IndexSource;

/// Long-running steps reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CheckCache,
    Download,
    Analyze,
}

/// How a reported step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
    Success,
    Failed,
    Complete,
}

/// Receives progress for each step of an analysis
///
/// `begin` returns a guard that lives for the duration of the step. If the
/// step fails with `?` the guard is dropped without `finish` being called.
pub trait Reporter {
    type Guard;

    fn begin(&self, stage: Stage, arch: Architecture) -> Self::Guard;

    fn finish(&self, guard: Self::Guard, outcome: Outcome);
}

/// Reporter that reports nothing
pub struct Silent;

impl Reporter for Silent {
    type Guard = ();

    fn begin(&self, _stage: Stage, _arch: Architecture) {}

    fn finish(&self, _guard: (), _outcome: Outcome) {}
}

/// Result of analyzing one architecture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub architecture: Architecture,
    pub entry: CacheEntry,
    /// Whether the entry was served from cache without downloading
    pub from_cache: bool,
}

impl Analysis {
    /// The `n` highest ranked packages
    pub fn top(&self, n: usize) -> &[PackageCount] {
        self.entry.packages.top(n)
    }
}

/// Runs the check-cache, fetch, parse, persist sequence
pub struct Analyzer<'a, S, R> {
    source: S,
    store: &'a CacheStore,
    limits: Limits,
    reporter: R,
    force_refresh: bool,
}

impl<'a, S: IndexSource, R: Reporter> Analyzer<'a, S, R> {
    pub fn new(source: S, store: &'a CacheStore, limits: Limits, reporter: R) -> Self {
        Self {
            source,
            store,
            limits,
            reporter,
            force_refresh: false,
        }
    }

    /// Ignore any cached entry and always download the index
    pub fn force_refresh(mut self, force: bool) -> Self {
        self.force_refresh = force;
        self
    }

    /// Produce the ranked package counts for `arch`
    ///
    /// Serves the cached entry when it is fresh and large enough, otherwise
    /// downloads and parses the index and overwrites the cache entry. A failed
    /// download aborts the analysis.
    pub fn analyze(&self, arch: Architecture) -> Result<Analysis> {
        let mut cache = self.store.load()?;

        let guard = self.reporter.begin(Stage::CheckCache, arch);
        let server_token = self.source.fetch_freshness_token(arch);
        let valid = !self.force_refresh
            && cache::validate(
                cache.get(arch.as_str()),
                &server_token,
                self.limits.show_count,
            );

        if valid {
            self.reporter.finish(guard, Outcome::Found);
            if let Some(entry) = cache.remove(arch.as_str()) {
                tracing::info!(%arch, token = %server_token, "Using cached statistics");
                return Ok(Analysis {
                    architecture: arch,
                    entry,
                    from_cache: true,
                });
            }
        } else {
            self.reporter.finish(guard, Outcome::NotFound);
        }

        if server_token.is_empty() {
            tracing::info!(%arch, "No freshness token; cache cannot be trusted");
        }

        let guard = self.reporter.begin(Stage::Download, arch);
        let compressed = match self.source.fetch_index(arch) {
            Ok(bytes) => {
                self.reporter.finish(guard, Outcome::Success);
                bytes
            }
            Err(e) => {
                self.reporter.finish(guard, Outcome::Failed);
                return Err(e);
            }
        };

        let guard = self.reporter.begin(Stage::Analyze, arch);
        let counts = match contents::count_gzipped(&compressed) {
            Ok(counts) => counts,
            Err(e) => {
                self.reporter.finish(guard, Outcome::Failed);
                return Err(e);
            }
        };
        let packages = contents::select_top(counts, self.limits.cache_size);
        self.reporter.finish(guard, Outcome::Complete);

        let entry = CacheEntry {
            last_modified: server_token,
            packages,
        };
        self.store.store(&mut cache, arch, entry.clone())?;
        tracing::info!(%arch, packages = entry.packages.len(), "Cached fresh statistics");

        Ok(Analysis {
            architecture: arch,
            entry,
            from_cache: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::error::DebtopError;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::cell::{Cell, RefCell};
    use std::io::Write;
    use tempfile::TempDir;

    /// Index where valid_packageN has N files for N <= 50 and each odd N in
    /// 51..=99 shares N files with N + 1, surrounded by rows to be ignored
    fn synthetic_index() -> Vec<u8> {
        let mut text = String::from(
            "This file maps each file available in the Debian system to\n\
             the package from which it originates. It includes packages from the\n\
             main distribution.\n\n",
        );
        text.push_str("FILE                                                    LOCATION\n");
        text.push_str("no_slash_here invalid_package1\n");
        text.push_str("usr/bin/lonely\n");
        text.push_str("   \n");

        for n in 1..=50 {
            for i in 0..n {
                text.push_str(&format!("usr/share/valid{n}/file{i} valid_package{n}\n"));
            }
        }
        for n in (51..=99).step_by(2) {
            for i in 0..n {
                text.push_str(&format!(
                    "usr/lib/pair {n}/file {i}.so valid_package{n},valid_package{}\n",
                    n + 1
                ));
            }
        }

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    struct FakeSource {
        token: RefCell<String>,
        index: Option<Vec<u8>>,
        downloads: Cell<usize>,
    }

    impl FakeSource {
        fn new(token: &str) -> Self {
            Self {
                token: RefCell::new(token.to_string()),
                index: Some(synthetic_index()),
                downloads: Cell::new(0),
            }
        }

        fn failing(token: &str) -> Self {
            Self {
                index: None,
                ..Self::new(token)
            }
        }
    }

    impl IndexSource for FakeSource {
        fn fetch_index(&self, arch: Architecture) -> Result<Vec<u8>> {
            self.downloads.set(self.downloads.get() + 1);
            self.index.clone().ok_or_else(|| {
                DebtopError::download(arch.index_file_name(), Some(404), "Not Found")
            })
        }

        fn fetch_freshness_token(&self, _arch: Architecture) -> String {
            self.token.borrow().clone()
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<(Stage, Outcome)>>,
    }

    impl Reporter for &Recorder {
        type Guard = Stage;

        fn begin(&self, stage: Stage, _arch: Architecture) -> Stage {
            stage
        }

        fn finish(&self, stage: Stage, outcome: Outcome) {
            self.events.borrow_mut().push((stage, outcome));
        }
    }

    fn make_store(temp_dir: &TempDir) -> CacheStore {
        CacheStore::new(temp_dir.path().join("architecture_cache.json"))
    }

    fn package_number(name: &str) -> u64 {
        name.strip_prefix("valid_package").unwrap().parse().unwrap()
    }

    #[test]
    fn test_cold_cache_ranks_synthetic_index() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource::new("v1");

        let analysis = Analyzer::new(&source, &store, Limits::default(), Silent)
            .analyze(Architecture::Amd64)
            .unwrap();

        assert!(!analysis.from_cache);
        assert_eq!(source.downloads.get(), 1);

        let packages = analysis.entry.packages.as_slice();
        assert_eq!(packages.len(), 30);
        assert_eq!(packages[0], PackageCount::new("valid_package99", 99));
        assert_eq!(packages[1], PackageCount::new("valid_package100", 99));
        assert_eq!(packages[29], PackageCount::new("valid_package72", 71));

        for entry in packages {
            let n = package_number(&entry.package);
            let expected = if n <= 50 || n % 2 == 1 { n } else { n - 1 };
            assert_eq!(entry.files, expected, "{}", entry.package);
        }
        assert!(packages.windows(2).all(|w| w[0].files >= w[1].files));
    }

    #[test]
    fn test_cold_cache_persists_entry() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource::new("v1");

        let analysis = Analyzer::new(&source, &store, Limits::default(), Silent)
            .analyze(Architecture::Arm64)
            .unwrap();

        let cache = store.load().unwrap();
        assert_eq!(cache.get("arm64"), Some(&analysis.entry));
        assert_eq!(cache["arm64"].last_modified, "v1");
    }

    #[test]
    fn test_warm_cache_skips_download() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource::new("v1");
        let analyzer = Analyzer::new(&source, &store, Limits::default(), Silent);

        let first = analyzer.analyze(Architecture::Amd64).unwrap();
        let second = analyzer.analyze(Architecture::Amd64).unwrap();

        assert!(second.from_cache);
        assert_eq!(second.entry, first.entry);
        assert_eq!(source.downloads.get(), 1);
    }

    #[test]
    fn test_changed_token_forces_download() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource::new("v1");
        let analyzer = Analyzer::new(&source, &store, Limits::default(), Silent);

        analyzer.analyze(Architecture::Amd64).unwrap();
        *source.token.borrow_mut() = "v2".to_string();
        let analysis = analyzer.analyze(Architecture::Amd64).unwrap();

        assert!(!analysis.from_cache);
        assert_eq!(source.downloads.get(), 2);
        assert_eq!(store.load().unwrap()["amd64"].last_modified, "v2");
    }

    #[test]
    fn test_empty_token_always_downloads() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource::new("");
        let analyzer = Analyzer::new(&source, &store, Limits::default(), Silent);

        analyzer.analyze(Architecture::Amd64).unwrap();
        let analysis = analyzer.analyze(Architecture::Amd64).unwrap();

        assert!(!analysis.from_cache);
        assert_eq!(source.downloads.get(), 2);
    }

    #[test]
    fn test_undersized_entry_forces_download() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let mut cache = Cache::new();
        let small = CacheEntry {
            last_modified: "v1".to_string(),
            packages: vec![PackageCount::new("stale", 1); 9].into(),
        };
        store.store(&mut cache, Architecture::Amd64, small).unwrap();

        let source = FakeSource::new("v1");
        let analysis = Analyzer::new(&source, &store, Limits::default(), Silent)
            .analyze(Architecture::Amd64)
            .unwrap();

        assert!(!analysis.from_cache);
        assert_eq!(analysis.entry.packages.len(), 30);
    }

    #[test]
    fn test_force_refresh_ignores_valid_cache() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource::new("v1");

        Analyzer::new(&source, &store, Limits::default(), Silent)
            .analyze(Architecture::Amd64)
            .unwrap();
        let analysis = Analyzer::new(&source, &store, Limits::default(), Silent)
            .force_refresh(true)
            .analyze(Architecture::Amd64)
            .unwrap();

        assert!(!analysis.from_cache);
        assert_eq!(source.downloads.get(), 2);
    }

    #[test]
    fn test_download_failure_aborts_and_leaves_cache_alone() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource::failing("v1");

        let err = Analyzer::new(&source, &store, Limits::default(), Silent)
            .analyze(Architecture::Armhf)
            .unwrap_err();

        assert!(matches!(err, DebtopError::Download { .. }));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupted_cache_is_surfaced() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        std::fs::write(store.path(), "{ not json").unwrap();
        let source = FakeSource::new("v1");

        let err = Analyzer::new(&source, &store, Limits::default(), Silent)
            .analyze(Architecture::Amd64)
            .unwrap_err();

        assert!(matches!(err, DebtopError::CorruptCache { .. }));
        assert_eq!(source.downloads.get(), 0);
    }

    #[test]
    fn test_custom_limits() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource::new("v1");
        let limits = Limits {
            show_count: 3,
            cache_size: 5,
        };

        let analysis = Analyzer::new(&source, &store, limits, Silent)
            .analyze(Architecture::I386)
            .unwrap();

        assert_eq!(analysis.entry.packages.len(), 5);
        assert_eq!(analysis.top(3).len(), 3);
        assert_eq!(analysis.top(limits.show_count)[2].package, "valid_package97");
    }

    #[test]
    fn test_show_count_above_cache_size_is_never_valid() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource::new("v1");
        let limits = Limits {
            show_count: 40,
            cache_size: 30,
        };
        let analyzer = Analyzer::new(&source, &store, limits, Silent);

        analyzer.analyze(Architecture::Amd64).unwrap();
        let analysis = analyzer.analyze(Architecture::Amd64).unwrap();

        assert!(!analysis.from_cache);
        assert_eq!(analysis.top(limits.show_count).len(), 30);
    }

    #[test]
    fn test_reporter_sees_each_stage() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource::new("v1");
        let recorder = Recorder::default();
        let analyzer = Analyzer::new(&source, &store, Limits::default(), &recorder);

        analyzer.analyze(Architecture::Amd64).unwrap();
        analyzer.analyze(Architecture::Amd64).unwrap();

        assert_eq!(
            *recorder.events.borrow(),
            vec![
                (Stage::CheckCache, Outcome::NotFound),
                (Stage::Download, Outcome::Success),
                (Stage::Analyze, Outcome::Complete),
                (Stage::CheckCache, Outcome::Found),
            ]
        );
    }

    #[test]
    fn test_reporter_sees_failed_download() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource::failing("v1");
        let recorder = Recorder::default();

        let _ = Analyzer::new(&source, &store, Limits::default(), &recorder)
            .analyze(Architecture::Amd64);

        assert_eq!(
            recorder.events.borrow().last(),
            Some(&(Stage::Download, Outcome::Failed))
        );
    }

    #[test]
    fn test_reporter_sees_failed_analysis() {
        let temp_dir = TempDir::new().unwrap();
        let store = make_store(&temp_dir);
        let source = FakeSource {
            index: Some(b"not a gzip stream".to_vec()),
            ..FakeSource::new("v1")
        };
        let recorder = Recorder::default();

        let result = Analyzer::new(&source, &store, Limits::default(), &recorder)
            .analyze(Architecture::Amd64);

        assert!(result.is_err());
        assert_eq!(
            recorder.events.borrow().last(),
            Some(&(Stage::Analyze, Outcome::Failed))
        );
        assert!(store.load().unwrap().is_empty());
    }
}
