use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::arch::Architecture;

/// Show which Debian packages ship the most files for an architecture
#[derive(Parser)]
#[command(name = "debtop")]
#[command(version, propagate_version = true)]
#[command(about = "Show which Debian packages ship the most files for an architecture")]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Suppress progress messages
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log more detail to the log file (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Mirror directory containing Contents-<arch>.gz (overrides config)
    #[arg(long, env = "DEBTOP_MIRROR", global = true)]
    pub mirror: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Print shell completions to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Self::command();
        clap_complete::generate(shell, &mut cmd, "debtop", &mut std::io::stdout());
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the packages with the most files for an architecture
    #[command(alias = "t")]
    Top(TopArgs),

    /// List the architectures that can be analyzed
    Archs,

    /// Manage the local statistics cache
    Cache(CacheArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the top command
#[derive(Args)]
pub struct TopArgs {
    /// Architecture whose Contents index to analyze
    #[arg(value_enum, hide_possible_values = true)]
    pub arch: Architecture,

    /// Number of packages to show (overrides display.show_count)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,

    /// Ignore the cache and download the index again
    #[arg(short, long)]
    pub refresh: bool,
}

/// Arguments for the cache command
#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

/// Cache subcommands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show cached architectures
    Status,
    /// Clear cached statistics
    Clear {
        /// Only clear this architecture
        #[arg(long, value_enum, hide_possible_values = true)]
        arch: Option<Architecture>,
    },
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., display.show_count)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
