//! CLI argument definitions for quotedesk.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Show one quote with company name and industry |
//! | `report` | Write the portfolio report |
//! | `watchlist` | Write the watchlist report |
//! | `raw` | Dump the provider record for a symbol |
//! | `interactive` | Prompt loop (default) |
//!
//! # Examples
//!
//! ```bash
//! quotedesk quote IBM
//! quotedesk report --pace-secs 15
//! quotedesk --env-file ~/.quotedesk.env watchlist
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Real-time equity quotes and plain-text portfolio reports.
#[derive(Debug, Parser)]
#[command(
    name = "quotedesk",
    author,
    version,
    about = "Real-time equity quotes and plain-text portfolio reports",
    long_about = "quotedesk looks up equity quotes from Alpha Vantage, shows them with \
color-coded moves, and writes portfolio and watchlist reports.\n\
\n\
Settings are read from a .env file or the environment: API_KEY (required), \
PORTFOLIO, WATCHLIST, SYMBOLS, QUOTEDESK_BASE_URL."
)]
pub struct Cli {
    /// Path of the .env file to load (defaults to ./.env and its parents).
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Provider endpoint override.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Seconds to wait between batch requests (default: free-tier spacing of 12).
    #[arg(long, global = true)]
    pub pace_secs: Option<u64>,

    /// Disable colored output.
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,

    /// Destination of the portfolio report.
    #[arg(long, global = true, default_value = "report.txt")]
    pub report_path: PathBuf,

    /// Destination of the watchlist report.
    #[arg(long, global = true, default_value = "watchlist.txt")]
    pub watchlist_path: PathBuf,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 5_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a quote with company name and industry.
    ///
    ///   quotedesk quote IBM
    Quote(SymbolArgs),

    /// Write the portfolio report (PORTFOLIO) to --report-path.
    Report,

    /// Write the watchlist report (WATCHLIST) to --watchlist-path.
    Watchlist,

    /// Dump the raw provider record for a symbol.
    Raw(SymbolArgs),

    /// Prompt for symbols and keywords until 'quit'.
    Interactive,
}

#[derive(Debug, Args)]
pub struct SymbolArgs {
    /// Ticker symbol (e.g., IBM, MSFT, TSCO.LON).
    pub symbol: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["quotedesk"]).expect("parses");
        assert!(cli.command.is_none());
        assert_eq!(cli.report_path, PathBuf::from("report.txt"));
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["quotedesk", "report", "--pace-secs", "0", "--no-color"])
            .expect("parses");
        assert!(matches!(cli.command, Some(Command::Report)));
        assert_eq!(cli.pace_secs, Some(0));
        assert!(cli.no_color);
    }
}
