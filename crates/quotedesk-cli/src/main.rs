mod cli;
mod commands;
mod error;

use clap::Parser;
use std::process::ExitCode;
use time::UtcOffset;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "quotedesk=info,quotedesk_core=info";

fn main() -> ExitCode {
    init_tracing();

    // Must run while the process is still single-threaded.
    let offset = quotedesk_core::local_offset().unwrap_or_else(|| {
        warn!("local UTC offset unavailable; report timestamps use UTC");
        UtcOffset::UTC
    });

    match run(offset) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run(offset: UtcOffset) -> Result<(), CliError> {
    let cli = Cli::parse();

    // Requests are strictly sequential, so a single-threaded runtime is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(commands::run(&cli, offset))
}

// Logs go to stderr; stdout is the operator view.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
