//! Sequential, paced batch runs over a portfolio or watchlist.

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::time::Duration;

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::fetcher::{FetchOutcome, QuoteFetcher};
use crate::pacing::{FixedIntervalPacer, PacingPolicy, ProviderQuota};
use crate::render::{render_outcome, ReportWriter};
use crate::{CoreError, FetchFailure, Symbol};

/// Which configured symbol list a batch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Portfolio,
    Watchlist,
}

impl BatchKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Portfolio => "Portfolio",
            Self::Watchlist => "Watchlist",
        }
    }

    pub const fn default_report_path(self) -> &'static str {
        match self {
            Self::Portfolio => "report.txt",
            Self::Watchlist => "watchlist.txt",
        }
    }
}

/// Per-run lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Init,
    Fetching,
    Rendering,
    Appended,
    Completed,
}

/// Ordered symbols plus where and how fast to report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub kind: BatchKind,
    pub symbols: Vec<Symbol>,
    pub report_path: PathBuf,
    pub pacing_interval: Duration,
}

impl BatchRequest {
    pub fn new(kind: BatchKind, symbols: Vec<Symbol>) -> Self {
        Self {
            kind,
            symbols,
            report_path: PathBuf::from(kind.default_report_path()),
            pacing_interval: ProviderQuota::alphavantage_free_tier().min_interval(),
        }
    }

    pub fn with_report_path(mut self, report_path: impl AsRef<Path>) -> Self {
        self.report_path = report_path.as_ref().to_path_buf();
        self
    }

    pub fn with_pacing_interval(mut self, pacing_interval: Duration) -> Self {
        self.pacing_interval = pacing_interval;
        self
    }

    /// Default pacer for this request's interval.
    pub fn pacer(&self) -> FixedIntervalPacer {
        FixedIntervalPacer::new(self.pacing_interval)
    }
}

/// Outcome counts for a finished batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub succeeded: Vec<Symbol>,
    pub failed: Vec<(Symbol, FetchFailure)>,
}

impl BatchSummary {
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn total(&self) -> usize {
        self.success_count() + self.failure_count()
    }
}

/// Fetch every symbol in order, pacing between requests.
///
/// `on_result` sees each outcome as soon as it arrives. Fetch failures are
/// recorded and the run continues; only an error from `on_result` stops it.
pub async fn run_batch<P, F, E>(
    fetcher: &QuoteFetcher,
    pacer: &mut P,
    symbols: &[Symbol],
    mut on_result: F,
) -> Result<BatchSummary, E>
where
    P: PacingPolicy + ?Sized,
    F: FnMut(&Symbol, &FetchOutcome) -> Result<(), E>,
{
    let mut summary = BatchSummary::default();
    debug!(phase = ?BatchPhase::Init, symbols = symbols.len());

    for (index, symbol) in symbols.iter().enumerate() {
        if index > 0 {
            pacer.pace().await;
        }

        debug!(phase = ?BatchPhase::Fetching, symbol = %symbol);
        pacer.record_request();
        let outcome = fetcher.fetch(symbol).await;

        debug!(phase = ?BatchPhase::Rendering, symbol = %symbol);
        on_result(symbol, &outcome)?;
        debug!(phase = ?BatchPhase::Appended, symbol = %symbol);

        match outcome {
            FetchOutcome::Ok(_) => summary.succeeded.push(symbol.clone()),
            FetchOutcome::Failed { symbol, reason } => summary.failed.push((symbol, reason)),
        }
    }

    debug!(
        phase = ?BatchPhase::Completed,
        succeeded = summary.success_count(),
        failed = summary.failure_count()
    );
    Ok(summary)
}

/// [`run_batch`] with a callback that cannot fail.
pub async fn run_batch_infallible<P, F>(
    fetcher: &QuoteFetcher,
    pacer: &mut P,
    symbols: &[Symbol],
    mut on_result: F,
) -> BatchSummary
where
    P: PacingPolicy + ?Sized,
    F: FnMut(&Symbol, &FetchOutcome),
{
    let result = run_batch(fetcher, pacer, symbols, |symbol, outcome| {
        on_result(symbol, outcome);
        Ok::<(), Infallible>(())
    })
    .await;

    match result {
        Ok(summary) => summary,
        Err(never) => match never {},
    }
}

/// Run a batch into its report file.
///
/// The file is truncated and headed once, then each rendered block is
/// appended and flushed as it arrives, so an interrupted run still leaves a
/// well-formed report. Every block is also passed to `echo`.
pub async fn run_report<P, F>(
    fetcher: &QuoteFetcher,
    pacer: &mut P,
    request: &BatchRequest,
    generated_at: OffsetDateTime,
    mut echo: F,
) -> Result<BatchSummary, CoreError>
where
    P: PacingPolicy + ?Sized,
    F: FnMut(&str),
{
    let mut writer = ReportWriter::create(&request.report_path, generated_at)?;

    let summary = run_batch(fetcher, pacer, &request.symbols, |symbol, outcome| {
        let block = render_outcome(symbol, outcome);
        echo(&block);
        writer.append(&block)
    })
    .await?;

    info!(
        kind = request.kind.label(),
        path = %request.report_path.display(),
        succeeded = summary.success_count(),
        failed = summary.failure_count(),
        "report completed"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_follow_kind_and_free_tier() {
        let request = BatchRequest::new(BatchKind::Watchlist, Vec::new());
        assert_eq!(request.report_path, PathBuf::from("watchlist.txt"));
        assert_eq!(request.pacing_interval, Duration::from_secs(12));
        assert_eq!(request.pacer().interval(), Duration::from_secs(12));
    }

    #[test]
    fn summary_counts_add_up() {
        let summary = BatchSummary {
            succeeded: vec![Symbol::parse("IBM").expect("valid")],
            failed: vec![(
                Symbol::parse("NOPE").expect("valid"),
                FetchFailure::NoDataForSymbol,
            )],
        };
        assert_eq!(summary.success_count(), 1);
        assert_eq!(summary.failure_count(), 1);
        assert_eq!(summary.total(), 2);
    }
}
