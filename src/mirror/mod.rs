//! Access to the Debian mirror hosting Contents indices

mod client;

pub use client::MirrorClient;

use crate::arch::Architecture;
use crate::error::Result;

/// Where compressed Contents indices and their freshness tokens come from
pub trait IndexSource {
    /// Download the gzip-compressed Contents index for `arch`
    ///
    /// Fails with [`DebtopError::Download`](crate::error::DebtopError::Download)
    /// when the index cannot be retrieved.
    fn fetch_index(&self, arch: Architecture) -> Result<Vec<u8>>;

    /// Opaque marker identifying the current version of the index
    ///
    /// Returns an empty string when the marker cannot be determined.
    fn fetch_freshness_token(&self, arch: Architecture) -> String;
}

impl<T: IndexSource + ?Sized> IndexSource for &T {
    fn fetch_index(&self, arch: Architecture) -> Result<Vec<u8>> {
        (**self).fetch_index(arch)
    }

    fn fetch_freshness_token(&self, arch: Architecture) -> String {
        (**self).fetch_freshness_token(arch)
    }
}
