use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::paths::Paths;
use crate::error::{DebtopError, Result};

/// Mirror directory holding the stable/main Contents indices
pub const DEFAULT_MIRROR_URL: &str = "http://ftp.uk.debian.org/debian/dists/stable/main";

/// Packages shown to the user
pub const DEFAULT_SHOW_COUNT: usize = 10;

/// Packages kept in the cache, so the display can grow without a re-download
pub const DEFAULT_CACHE_SIZE: usize = 30;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Mirror configuration
    #[serde(default)]
    pub mirror: MirrorConfig,

    /// How many packages to show and keep
    #[serde(default)]
    pub display: DisplayConfig,

    /// Cache location
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Mirror-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Base URL of the directory containing `Contents-<arch>.gz`
    #[serde(default = "default_mirror_url")]
    pub url: String,
}

fn default_mirror_url() -> String {
    DEFAULT_MIRROR_URL.to_string()
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            url: default_mirror_url(),
        }
    }
}

/// Display and ranking widths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_show_count")]
    pub show_count: usize,
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
}

fn default_show_count() -> usize {
    DEFAULT_SHOW_COUNT
}

fn default_cache_size() -> usize {
    DEFAULT_CACHE_SIZE
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_count: DEFAULT_SHOW_COUNT,
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

/// Cache file override
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache document path (defaults to ~/.debtop/architecture_cache.json)
    pub path: Option<PathBuf>,
}

/// Widths the analysis runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Packages shown, and the minimum a cached entry must hold
    pub show_count: usize,
    /// Packages ranked and stored
    pub cache_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            show_count: DEFAULT_SHOW_COUNT,
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific paths instance
    pub fn save_to(&self, paths: &Paths) -> Result<()> {
        paths.ensure_dirs()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&paths.config_file, &contents)?;
        Ok(())
    }

    /// Analysis widths, with an optional override for the display width
    pub fn limits(&self, show_count: Option<usize>) -> Limits {
        let limits = Limits {
            show_count: show_count.unwrap_or(self.display.show_count),
            cache_size: self.display.cache_size,
        };

        if limits.show_count > limits.cache_size {
            tracing::warn!(
                show_count = limits.show_count,
                cache_size = limits.cache_size,
                "Show count exceeds cache size; only cached packages can be shown"
            );
        }

        limits
    }

    /// Cache document path, falling back to the default under `paths`
    pub fn cache_file(&self, paths: &Paths) -> PathBuf {
        self.cache
            .path
            .clone()
            .unwrap_or_else(|| paths.cache_file.clone())
    }

    /// Set a value by dotted key, as used by `config set`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "mirror.url" => {
                url::Url::parse(value).map_err(|e| {
                    DebtopError::InvalidArgument(format!("Invalid mirror URL '{value}': {e}"))
                })?;
                self.mirror.url = value.trim_end_matches('/').to_string();
            }
            "display.show_count" => self.display.show_count = parse_width(key, value)?,
            "display.cache_size" => self.display.cache_size = parse_width(key, value)?,
            "cache.path" => {
                self.cache.path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => {
                return Err(DebtopError::Config(format!(
                    "Unknown configuration key: {key}. Valid keys: mirror.url, display.show_count, display.cache_size, cache.path"
                )))
            }
        }
        Ok(())
    }
}

fn parse_width(key: &str, value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(DebtopError::InvalidArgument(format!(
            "{key} must be a positive integer, got '{value}'"
        ))),
    }
}
