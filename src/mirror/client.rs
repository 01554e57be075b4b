use reqwest::blocking::Client;
use reqwest::header::LAST_MODIFIED;
use std::time::Duration;
use url::Url;

use super::IndexSource;
use crate::arch::Architecture;
use crate::error::{DebtopError, Result};

const USER_AGENT: &str = concat!("debtop/", env!("CARGO_PKG_VERSION"));

/// Contents indices run to tens of megabytes on slow mirrors
const DOWNLOAD_TIMEOUT_SECS: u64 = 300;
const HEAD_TIMEOUT_SECS: u64 = 15;

/// HTTP client for a Debian mirror's `dists/<suite>/<component>` directory
pub struct MirrorClient {
    client: Client,
    base_url: String,
}

impl MirrorClient {
    /// Create a client for the mirror directory at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url).map_err(|e| {
            DebtopError::InvalidArgument(format!("Invalid mirror URL '{base_url}': {e}"))
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the Contents index for `arch`
    pub fn index_url(&self, arch: Architecture) -> String {
        format!("{}/{}", self.base_url, arch.index_file_name())
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| DebtopError::download(url, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DebtopError::download(
                url,
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let bytes = response
            .bytes()
            .map_err(|e| DebtopError::download(url, None, e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn last_modified(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .head(url)
            .timeout(Duration::from_secs(HEAD_TIMEOUT_SECS))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DebtopError::download(
                url,
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        Ok(response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string())
            .unwrap_or_default())
    }
}

impl IndexSource for MirrorClient {
    fn fetch_index(&self, arch: Architecture) -> Result<Vec<u8>> {
        let url = self.index_url(arch);
        tracing::info!(%url, "Downloading contents index");

        let bytes = self
            .download(&url)
            .inspect_err(|err| tracing::error!("{err}"))?;
        tracing::debug!(%url, bytes = bytes.len(), "Download complete");

        Ok(bytes)
    }

    fn fetch_freshness_token(&self, arch: Architecture) -> String {
        let url = self.index_url(arch);
        match self.last_modified(&url) {
            Ok(token) => {
                if token.is_empty() {
                    tracing::info!(%url, "Mirror sent no Last-Modified header");
                }
                token
            }
            Err(e) => {
                tracing::info!(%arch, error = %e, "Failed reading last modify time of contents index");
                String::new()
            }
        }
    }
}
