//! CLI argument definitions for etflens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `series` | Fetch one symbol's daily series and aggregate it |
//! | `compare` | Fetch several symbols and aggregate each side by side |
//!
//! # Examples
//!
//! ```bash
//! # Monthly roll-up of the gold ETF
//! etflens series GLD --resolution monthly
//!
//! # The classic gold-vs-bitcoin comparison, quarterly
//! etflens compare --symbols GLD,IBIT --resolution quarterly --format json --pretty
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Fetch, cache, and aggregate daily ETF price series.
#[derive(Debug, Parser)]
#[command(
    name = "etflens",
    author,
    version,
    about = "Daily ETF series fetcher and calendar-period aggregator"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one symbol's daily series and aggregate it.
    Series(SeriesArgs),
    /// Fetch several symbols and aggregate each at the same resolution.
    Compare(CompareArgs),
}

#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// ETF/ticker symbol, e.g. GLD.
    pub symbol: String,

    /// Aggregation resolution (daily, weekly, monthly, quarterly, yearly).
    #[arg(long, default_value = "daily")]
    pub resolution: String,

    /// Alpha Vantage output size (full or compact).
    #[arg(long, default_value = "full")]
    pub output_size: String,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Comma-separated symbols to compare.
    #[arg(long, value_delimiter = ',', default_value = "GLD,IBIT")]
    pub symbols: Vec<String>,

    /// Aggregation resolution (daily, weekly, monthly, quarterly, yearly).
    #[arg(long, default_value = "monthly")]
    pub resolution: String,

    /// Alpha Vantage output size (full or compact).
    #[arg(long, default_value = "full")]
    pub output_size: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
