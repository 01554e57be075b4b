use std::fs;
use std::path::PathBuf;

use crate::error::Result;

/// Manages paths for debtop configuration and data
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory (~/.debtop)
    pub root: PathBuf,
    /// Configuration file path (~/.debtop/config.toml)
    pub config_file: PathBuf,
    /// Default cache document (~/.debtop/architecture_cache.json)
    pub cache_file: PathBuf,
    /// Log file (~/.debtop/debtop.log)
    pub log_file: PathBuf,
}

impl Paths {
    /// Create a new Paths instance using the user's home directory
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME")?;
        Ok(Self::with_root(PathBuf::from(home).join(".debtop")))
    }

    /// Lay out all paths under an explicit root directory
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.toml"),
            cache_file: root.join("architecture_cache.json"),
            log_file: root.join("debtop.log"),
            root,
        }
    }

    /// Ensure the root directory exists
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Check if the config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".debtop")))
    }
}
