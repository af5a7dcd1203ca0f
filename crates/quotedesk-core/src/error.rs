use thiserror::Error;

/// Validation errors raised while turning provider payloads into domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with a letter or digit: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("quote payload is missing field '{field}'")]
    MissingField { field: &'static str },
    #[error("field '{field}' is not a number: '{value}'")]
    MalformedNumber { field: &'static str, value: String },
    #[error("field '{field}' is outside the supported price range: '{value}'")]
    OutOfRange { field: &'static str, value: String },
}

/// Per-symbol fetch failure. Never fatal to a batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("no data returned for symbol")]
    NoDataForSymbol,
    #[error("unexpected response from provider: {0}")]
    UnexpectedResponseBody(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid quote payload: {0}")]
    InvalidQuote(#[from] ValidationError),
}

impl FetchFailure {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoDataForSymbol => "fetch.no_data",
            Self::UnexpectedResponseBody(_) => "fetch.unexpected_body",
            Self::Network(_) => "fetch.network",
            Self::InvalidQuote(_) => "fetch.invalid_quote",
        }
    }
}

/// A derived metric that has no representable value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MetricError {
    #[error("percent change is undefined for a zero open price")]
    DivisionByZero,
    #[error("percent change does not fit in a decimal")]
    Overflow,
}

/// Settings could not be assembled from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API_KEY is not set; add it to your .env file or environment")]
    MissingApiKey,
    #[error("invalid symbol list in {key}: {reason}")]
    InvalidSymbolList { key: &'static str, reason: String },
    #[error("could not read env file: {0}")]
    EnvFile(String),
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("report file error: {0}")]
    Io(#[from] std::io::Error),
}
