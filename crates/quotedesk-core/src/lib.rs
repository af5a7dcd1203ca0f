//! # quotedesk core
//!
//! Quote retrieval and reporting engine for the `quotedesk` CLI.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Validated `Quote`, `Symbol`, and `CompanyOverview` types |
//! | [`fetcher`] | Provider request building and response classification |
//! | [`pacing`] | Minimum spacing between provider requests |
//! | [`batch`] | Sequential batch runs into report files |
//! | [`render`] | Interactive view, report blocks, and the report writer |
//! | [`config`] | Settings loaded from the environment |
//! | [`http_client`] | HTTP transport seam |
//! | [`error`] | Error types |
//!
//! ## Data flow
//!
//! ```text
//! symbol ──▶ QuoteFetcher ──▶ FetchOutcome ──▶ render ──▶ stdout / report file
//!                 ▲
//!   run_batch ────┘ (paced, one symbol at a time)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quotedesk_core::{render_report, FetchOutcome, QuoteFetcher, ReqwestHttpClient, Symbol};
//!
//! let fetcher = QuoteFetcher::new(Arc::new(ReqwestHttpClient::new()), "demo");
//! let symbol = Symbol::parse("IBM")?;
//! match fetcher.fetch(&symbol).await {
//!     FetchOutcome::Ok(quote) => print!("{}", render_report(&quote)),
//!     FetchOutcome::Failed { reason, .. } => eprintln!("{reason}"),
//! }
//! ```
//!
//! Requests are strictly sequential. The free tier allows five calls per
//! minute per key, so batches wait [`ProviderQuota::min_interval`] between
//! fetches.

pub mod batch;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod pacing;
pub mod render;

pub use batch::{
    run_batch, run_batch_infallible, run_report, BatchKind, BatchPhase, BatchRequest,
    BatchSummary,
};
pub use config::{load_env_file, parse_symbol_list, Settings};
pub use domain::{CompanyOverview, Quote, Sentiment, Symbol};
pub use error::{ConfigError, CoreError, FetchFailure, MetricError, ValidationError};
pub use fetcher::{
    classify_quote_body, FetchOutcome, ProviderFunction, QuoteFetcher, ALPHAVANTAGE_BASE_URL,
};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use pacing::{
    ElapsedIntervalPacer, FixedIntervalPacer, NoPacing, PacingPolicy, ProviderQuota,
};
pub use render::{
    local_offset, now_at, render_completion, render_failure, render_interactive, render_outcome,
    render_overview, render_report, report_header, AnsiStyler, PlainStyler, ReportWriter, Styler,
};
