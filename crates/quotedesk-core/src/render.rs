//! Terminal and report-file renderings of quotes and failures.
//!
//! Rendering functions are pure. Color is a [`Styler`] capability so the
//! layout can be checked without a terminal.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::batch::{BatchKind, BatchSummary};
use crate::fetcher::FetchOutcome;
use crate::{CompanyOverview, FetchFailure, Quote, Sentiment, Symbol};

pub const SEPARATOR: &str = "---------------------------";

/// Shown in place of a percent change that cannot be computed.
pub const NOT_APPLICABLE: &str = "N/A";

/// Applies a sentiment cue to text.
pub trait Styler {
    fn paint(&self, text: &str, sentiment: Sentiment) -> String;
}

/// Green for up, red for down, unstyled when flat.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyler;

impl Styler for AnsiStyler {
    fn paint(&self, text: &str, sentiment: Sentiment) -> String {
        match sentiment {
            Sentiment::Up => format!("\x1b[32m{text}\x1b[0m"),
            Sentiment::Down => format!("\x1b[31m{text}\x1b[0m"),
            Sentiment::Flat => text.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn paint(&self, text: &str, _sentiment: Sentiment) -> String {
        text.to_owned()
    }
}

/// Terse, colorized view for a single lookup.
pub fn render_interactive(quote: &Quote, styler: &dyn Styler) -> Vec<String> {
    let since_open = quote.since_open_sentiment();
    let price = styler.paint(&format!("${}", quote.price), since_open);
    let last = styler.paint(
        &format!("{} | {}", quote.last_change, quote.last_change_pct_display()),
        quote.last_change_sentiment(),
    );
    let day = styler.paint(&day_change_text(quote), since_open);

    vec![
        SEPARATOR.to_owned(),
        format!("{} |  {price}", quote.symbol),
        format!("Last {last}"),
        format!("Day: {day}"),
        SEPARATOR.to_owned(),
        format!("Open: ${}", quote.open),
        format!("Range: ${} -> ${}", quote.low, quote.high),
        format!("Volume: {} trades.", quote.volume),
        SEPARATOR.to_owned(),
    ]
}

/// Plain multi-line block ending in a blank line.
pub fn render_report(quote: &Quote) -> String {
    format!(
        "{} | ${}\n\
         Open: ${}\n\
         Price Change Since Open: {}\n\
         Last Price Change: {} | {}\n\
         Range: ${} -> ${}\n\
         Volume: {} trades.\n\n",
        quote.symbol,
        quote.price,
        quote.open,
        day_change_text(quote),
        quote.last_change,
        quote.last_change_pct_display(),
        quote.low,
        quote.high,
        quote.volume
    )
}

/// Readable block for a symbol that could not be quoted.
pub fn render_failure(symbol: &Symbol, reason: &FetchFailure) -> String {
    format!("Could not get quote for {symbol}: {}\n\n", failure_text(reason))
}

/// Report block for either kind of outcome.
pub fn render_outcome(symbol: &Symbol, outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::Ok(quote) => render_report(quote),
        FetchOutcome::Failed { reason, .. } => render_failure(symbol, reason),
    }
}

pub fn render_overview(overview: &CompanyOverview) -> Vec<String> {
    let mut lines = vec![SEPARATOR.to_owned(), overview.name.clone()];
    if let Some(industry) = &overview.industry {
        lines.push(industry.clone());
    }
    lines
}

/// One-line completion notice for the operator.
pub fn render_completion(kind: BatchKind, summary: &BatchSummary) -> String {
    if summary.failure_count() == 0 {
        format!("{} Report Completed", kind.label())
    } else {
        format!(
            "{} Report Completed ({} of {} symbols failed)",
            kind.label(),
            summary.failure_count(),
            summary.total()
        )
    }
}

pub fn report_header(generated_at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let stamp = generated_at
        .format(format)
        .unwrap_or_else(|_| generated_at.to_string());
    format!("Report for {stamp}\n")
}

/// The host's UTC offset, or `None` when it cannot be read safely.
///
/// On Unix the offset is only readable while the process is single-threaded,
/// so call this before starting the async runtime and keep the result.
pub fn local_offset() -> Option<UtcOffset> {
    UtcOffset::current_local_offset().ok()
}

/// Current time at a fixed offset captured by [`local_offset`].
pub fn now_at(offset: UtcOffset) -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(offset)
}

/// Truncate-then-append report file owned by a single batch run.
#[derive(Debug)]
pub struct ReportWriter {
    path: PathBuf,
    file: File,
}

impl ReportWriter {
    /// Create or truncate `path` and write the header line.
    pub fn create(path: impl AsRef<Path>, generated_at: OffsetDateTime) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::create(&path)?;
        file.write_all(report_header(generated_at).as_bytes())?;
        file.flush()?;
        Ok(Self { path, file })
    }

    /// Append one block and flush it to disk.
    pub fn append(&mut self, block: &str) -> io::Result<()> {
        self.file.write_all(block.as_bytes())?;
        self.file.flush()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn day_change_text(quote: &Quote) -> String {
    match quote.day_change_pct() {
        Ok(pct) => format!("{} | {pct}%", quote.day_change()),
        Err(_) => format!("{} | {NOT_APPLICABLE}", quote.day_change()),
    }
}

// Keeps multi-line provider notices on one report line.
fn failure_text(reason: &FetchFailure) -> String {
    reason.to_string().split_whitespace().collect::<Vec<_>>().join(" ")
}
