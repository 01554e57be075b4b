use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for debtop operations
pub type Result<T> = std::result::Result<T, DebtopError>;

/// Errors that can occur during debtop operations
#[derive(Error, Debug)]
pub enum DebtopError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The Contents index could not be downloaded
    #[error("Download failure: {url}; {}", describe_status(.status, .reason))]
    Download {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// The persisted cache document could not be parsed
    #[error("Cache file {} is corrupted: {source}. Run 'debtop cache clear' to reset it.", .path.display())]
    CorruptCache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

fn describe_status(status: &Option<u16>, reason: &str) -> String {
    match status {
        Some(code) => format!("{code} - {reason}"),
        None => reason.to_string(),
    }
}

impl DebtopError {
    /// Create a download error from an HTTP status and reason phrase
    pub fn download(url: impl Into<String>, status: Option<u16>, reason: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            status,
            reason: reason.into(),
        }
    }

    /// Create a corrupted-cache error for the given cache file
    pub fn corrupt_cache(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CorruptCache {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is one the user is expected to see and act on,
    /// as opposed to an unexpected internal failure
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Download { .. }
                | Self::CorruptCache { .. }
                | Self::Config(_)
                | Self::InvalidArgument(_)
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::InvalidArgument(_) | Self::Toml(_) => 2,
            Self::Download { .. } => 3,
            Self::CorruptCache { .. } => 4,
            _ => 1,
        }
    }
}
