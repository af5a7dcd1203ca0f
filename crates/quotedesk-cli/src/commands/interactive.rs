use std::io::{self, BufRead, Write};

use quotedesk_core::{BatchKind, Symbol};

use crate::error::CliError;

use super::{quote, report, Context};

const PROMPT: &str = "Enter a stock symbol or type help for more options:";

const HELP: &str = "\
    'report' to generate portfolio report
    'watchlist' to generate a watchlist report
    'quit' to quit
    any other input is looked up as a stock symbol";

/// One line of operator input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Help,
    Quit,
    Batch(BatchKind),
    Lookup(String),
    Blank,
}

impl Input {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Self::Blank,
            "help" => Self::Help,
            "quit" => Self::Quit,
            "report" => Self::Batch(BatchKind::Portfolio),
            "watchlist" => Self::Batch(BatchKind::Watchlist),
            _ => Self::Lookup(trimmed.to_owned()),
        }
    }
}

/// Read-eval loop until `quit` or end of input.
pub async fn run(context: &Context) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };

        match Input::parse(&line?) {
            Input::Blank => {}
            Input::Help => println!("{HELP}"),
            Input::Quit => return Ok(()),
            Input::Batch(kind) => {
                // A broken report file ends this run, not the session.
                if let Err(error) = report::run(context, kind).await {
                    eprintln!("error: {error}");
                }
            }
            Input::Lookup(raw) => match Symbol::parse(&raw) {
                Ok(symbol) => {
                    let view = quote::lookup(context, &symbol).await;
                    quote::print_lines(&view.lines);
                }
                Err(error) => println!("'{raw}' is not a valid symbol: {error}"),
            },
        }
    }
}
