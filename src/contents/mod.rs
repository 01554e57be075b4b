//! Contents index aggregation
//!
//! Turns a gzip-compressed `Contents-<arch>.gz` into a ranked list of the
//! packages that ship the most files.

pub mod parser;
pub mod rank;

pub use parser::{parse, RawCounts};
pub use rank::{select_top, PackageCount, RankedCounts};

use std::io::BufReader;

use flate2::read::MultiGzDecoder;

use crate::error::Result;

/// Decompress a gzipped index and tally file associations per package
pub fn count_gzipped(compressed: &[u8]) -> Result<RawCounts> {
    parse(BufReader::new(MultiGzDecoder::new(compressed)))
}
