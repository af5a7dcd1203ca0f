use quotedesk_core::render::SEPARATOR;
use quotedesk_core::{render_interactive, render_overview, FetchFailure, FetchOutcome, Symbol};

use crate::error::CliError;

use super::Context;

/// Lines to show for a single lookup, plus the quote failure if any.
pub struct LookupView {
    pub lines: Vec<String>,
    pub failure: Option<FetchFailure>,
}

pub async fn run(context: &Context, raw_symbol: &str) -> Result<(), CliError> {
    let symbol = Symbol::parse(raw_symbol)?;
    let view = lookup(context, &symbol).await;
    print_lines(&view.lines);

    match view.failure {
        Some(reason) => Err(CliError::Lookup {
            symbol: symbol.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Fetch the quote and the company overview and render both. Problems become
/// readable lines rather than errors.
pub async fn lookup(context: &Context, symbol: &Symbol) -> LookupView {
    let outcome = context.fetcher.fetch(symbol).await;
    let overview = context.fetcher.overview(symbol).await;

    let mut lines = match &overview {
        Ok(overview) => render_overview(overview),
        Err(reason) => vec![SEPARATOR.to_owned(), reason.to_string()],
    };

    let failure = match outcome {
        FetchOutcome::Ok(quote) => {
            lines.extend(render_interactive(&quote, context.styler.as_ref()));
            None
        }
        FetchOutcome::Failed { reason, .. } => {
            lines.push(format!("Could not get quote for {symbol}: {reason}"));
            Some(reason)
        }
    };

    LookupView { lines, failure }
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
