use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::ValidationError;

/// Longest ticker the provider's symbol search has been seen to return,
/// exchange suffix included.
const MAX_TICKER_LEN: usize = 15;

/// Ticker in the form the `symbol=` query parameter expects.
///
/// Input is trimmed and upper-cased. Alpha Vantage addresses non-US listings
/// with an exchange suffix (`TSCO.LON`, `600104.SHH`) and share classes with a
/// dash or dot (`BRK-B`, `BRK.B`), so digits, `.` and `-` are allowed after a
/// leading letter or digit. Anything that could break out of the query string
/// is rejected before a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let ticker = input.trim().to_ascii_uppercase();

        let Some(first) = ticker.chars().next() else {
            return Err(ValidationError::EmptySymbol);
        };
        let len = ticker.chars().count();
        if len > MAX_TICKER_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_TICKER_LEN,
            });
        }
        if !first.is_ascii_alphanumeric() {
            return Err(ValidationError::SymbolInvalidStart { ch: first });
        }
        let invalid = ticker.chars().enumerate().find(|(_, ch)| !is_ticker_char(*ch));
        if let Some((index, ch)) = invalid {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        Ok(Self(ticker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_ticker_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-')
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
