use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] quotedesk_core::ConfigError),

    #[error(transparent)]
    Validation(#[from] quotedesk_core::ValidationError),

    #[error("could not get quote for {symbol}: {reason}")]
    Lookup {
        symbol: String,
        reason: quotedesk_core::FetchFailure,
    },

    #[error(transparent)]
    Core(#[from] quotedesk_core::CoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Validation(_) => 2,
            Self::Lookup { .. } => 3,
            Self::Serialization(_) => 4,
            Self::Core(_) => 10,
            Self::Io(_) => 10,
        }
    }
}
