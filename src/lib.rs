//! Rank the packages of a Debian Contents index by number of shipped files.

pub mod analyze;
pub mod arch;
pub mod cache;
pub mod cli;
pub mod config;
pub mod contents;
pub mod error;
pub mod logging;
pub mod mirror;
pub mod output;
pub mod progress;
