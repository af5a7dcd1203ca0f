use quotedesk_core::{now_at, render_completion, run_report, BatchKind, BatchRequest};

use crate::error::CliError;

use super::Context;

/// Run the portfolio or watchlist batch into its report file.
pub async fn run(context: &Context, kind: BatchKind) -> Result<(), CliError> {
    let symbols = match kind {
        BatchKind::Portfolio => context.settings.portfolio.clone(),
        BatchKind::Watchlist => context.settings.watchlist.clone(),
    };
    if symbols.is_empty() {
        tracing::warn!(kind = kind.label(), "symbol list is empty; writing header only");
    }

    let request = BatchRequest::new(kind, symbols)
        .with_report_path(context.report_path(kind))
        .with_pacing_interval(context.pacing_interval);
    let mut pacer = request.pacer();

    let generated_at = now_at(context.local_offset);
    let summary = run_report(&context.fetcher, &mut pacer, &request, generated_at, |block| {
        print!("{block}");
    })
    .await?;

    println!("{}", render_completion(kind, &summary));
    Ok(())
}
