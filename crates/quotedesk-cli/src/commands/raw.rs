use quotedesk_core::{FetchOutcome, Symbol};

use crate::error::CliError;

use super::Context;

/// Print the one-line summary and the original provider record.
pub async fn run(context: &Context, raw_symbol: &str) -> Result<(), CliError> {
    let symbol = Symbol::parse(raw_symbol)?;

    match context.fetcher.fetch(&symbol).await {
        FetchOutcome::Ok(quote) => {
            println!("{quote}");
            println!("{}", quote.raw_json()?);
            Ok(())
        }
        FetchOutcome::Failed { symbol, reason } => Err(CliError::Lookup {
            symbol: symbol.to_string(),
            reason,
        }),
    }
}
