mod interactive;
mod quote;
mod raw;
mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use quotedesk_core::{
    load_env_file, AnsiStyler, BatchKind, PlainStyler, ProviderQuota, QuoteFetcher,
    ReqwestHttpClient, Settings, Styler,
};
use time::UtcOffset;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Everything a command needs, built once from flags and settings.
pub struct Context {
    pub settings: Settings,
    pub fetcher: QuoteFetcher,
    pub styler: Box<dyn Styler>,
    pub pacing_interval: Duration,
    /// Offset captured before the runtime started; report headers use it.
    pub local_offset: UtcOffset,
    report_path: PathBuf,
    watchlist_path: PathBuf,
}

impl Context {
    pub fn from_cli(cli: &Cli, local_offset: UtcOffset) -> Result<Self, CliError> {
        match load_env_file(cli.env_file.as_deref())? {
            Some(path) => debug!(path = %path.display(), "loaded env file"),
            None => debug!("no env file found; using process environment"),
        }
        let settings = Settings::from_env()?;

        let base_url = cli
            .base_url
            .clone()
            .unwrap_or_else(|| settings.base_url.clone());
        let fetcher = QuoteFetcher::new(Arc::new(ReqwestHttpClient::new()), settings.api_key.clone())
            .with_base_url(base_url)
            .with_timeout_ms(cli.timeout_ms);

        let styler: Box<dyn Styler> = if cli.no_color {
            Box::new(PlainStyler)
        } else {
            Box::new(AnsiStyler)
        };
        let pacing_interval = cli.pace_secs.map(Duration::from_secs).unwrap_or_else(|| {
            ProviderQuota::alphavantage_free_tier().min_interval()
        });

        Ok(Self {
            settings,
            fetcher,
            styler,
            pacing_interval,
            local_offset,
            report_path: cli.report_path.clone(),
            watchlist_path: cli.watchlist_path.clone(),
        })
    }

    pub fn report_path(&self, kind: BatchKind) -> &Path {
        match kind {
            BatchKind::Portfolio => &self.report_path,
            BatchKind::Watchlist => &self.watchlist_path,
        }
    }
}

pub async fn run(cli: &Cli, local_offset: UtcOffset) -> Result<(), CliError> {
    let context = Context::from_cli(cli, local_offset)?;

    match &cli.command {
        Some(Command::Quote(args)) => quote::run(&context, &args.symbol).await,
        Some(Command::Report) => report::run(&context, BatchKind::Portfolio).await,
        Some(Command::Watchlist) => report::run(&context, BatchKind::Watchlist).await,
        Some(Command::Raw(args)) => raw::run(&context, &args.symbol).await,
        Some(Command::Interactive) | None => interactive::run(&context).await,
    }
}
