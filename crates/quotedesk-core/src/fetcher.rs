//! Provider request building and response classification.
//!
//! The fetcher issues exactly one GET per call and never retries. Every
//! response, including non-2xx statuses, goes through the same body
//! classification because the provider reports throttling and bad tickers
//! inside HTTP 200 bodies.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::http_client::{HttpClient, HttpRequest, HttpResponse, DEFAULT_TIMEOUT_MS};
use crate::{CompanyOverview, FetchFailure, Quote, Symbol};

/// Public Alpha Vantage query endpoint.
pub const ALPHAVANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

const GLOBAL_QUOTE_KEY: &str = "Global Quote";

/// Keys the provider uses for throttling and error notices.
const NOTICE_KEYS: [&str; 3] = ["Note", "Information", "Error Message"];

/// Provider query functions used by this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFunction {
    GlobalQuote,
    Overview,
}

impl ProviderFunction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GlobalQuote => "GLOBAL_QUOTE",
            Self::Overview => "OVERVIEW",
        }
    }
}

/// Result of fetching one symbol. A failed outcome never carries a partial quote.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Ok(Quote),
    Failed { symbol: Symbol, reason: FetchFailure },
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn quote(&self) -> Option<&Quote> {
        match self {
            Self::Ok(quote) => Some(quote),
            Self::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Ok(_) => None,
            Self::Failed { reason, .. } => Some(reason),
        }
    }
}

/// Quote and overview lookups against a query-style endpoint.
#[derive(Clone)]
pub struct QuoteFetcher {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    base_url: String,
    timeout_ms: u64,
}

impl QuoteFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            base_url: String::from(ALPHAVANTAGE_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL including the API key.
    pub fn request_url(&self, function: ProviderFunction, symbol: &Symbol) -> String {
        self.build_url(function, symbol, &self.api_key)
    }

    /// Fetch a single quote.
    pub async fn fetch(&self, symbol: &Symbol) -> FetchOutcome {
        let result = match self.get(ProviderFunction::GlobalQuote, symbol).await {
            Ok(response) => classify_quote_body(&response.body),
            Err(failure) => Err(failure),
        };

        match result {
            Ok(quote) => FetchOutcome::Ok(quote),
            Err(reason) => {
                debug!(symbol = %symbol, code = reason.code(), "quote lookup failed");
                FetchOutcome::Failed {
                    symbol: symbol.clone(),
                    reason,
                }
            }
        }
    }

    /// Fetch the company name and industry for a symbol.
    pub async fn overview(&self, symbol: &Symbol) -> Result<CompanyOverview, FetchFailure> {
        let response = self.get(ProviderFunction::Overview, symbol).await?;
        let Some(body) = parse_object(&response.body) else {
            return Err(FetchFailure::UnexpectedResponseBody(response.body));
        };
        CompanyOverview::from_json(symbol.clone(), &Value::Object(body), &response.body)
    }

    async fn get(
        &self,
        function: ProviderFunction,
        symbol: &Symbol,
    ) -> Result<HttpResponse, FetchFailure> {
        let request =
            HttpRequest::get(self.request_url(function, symbol)).with_timeout_ms(self.timeout_ms);
        debug!(url = %self.build_url(function, symbol, "***"), "requesting");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| FetchFailure::Network(error.message().to_owned()))?;

        if !response.is_success() {
            warn!(
                symbol = %symbol,
                function = function.as_str(),
                status = response.status,
                "provider returned non-success status"
            );
        }

        Ok(response)
    }

    fn build_url(&self, function: ProviderFunction, symbol: &Symbol, api_key: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}function={}&symbol={}&apikey={}",
            self.base_url,
            function.as_str(),
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(api_key)
        )
    }
}

/// Classify a `GLOBAL_QUOTE` response body.
///
/// 1. JSON object with a non-empty `Global Quote` record: parse it.
/// 2. JSON object made only of provider notices: unexpected body.
/// 3. Any other JSON object: no data for the symbol.
/// 4. Anything that is not a JSON object: unexpected body, verbatim.
pub fn classify_quote_body(body: &str) -> Result<Quote, FetchFailure> {
    let Some(object) = parse_object(body) else {
        return Err(FetchFailure::UnexpectedResponseBody(body.to_owned()));
    };

    match object.get(GLOBAL_QUOTE_KEY) {
        Some(record) if record.as_object().is_some_and(|fields| !fields.is_empty()) => {
            Quote::from_json(record).map_err(FetchFailure::from)
        }
        _ if is_notice_only(&object) => Err(FetchFailure::UnexpectedResponseBody(body.to_owned())),
        _ => Err(FetchFailure::NoDataForSymbol),
    }
}

fn parse_object(body: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

fn is_notice_only(object: &Map<String, Value>) -> bool {
    !object.is_empty() && object.keys().all(|key| NOTICE_KEYS.contains(&key.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    const IBM_BODY: &str = r#"{
        "Global Quote": {
            "01. symbol": "IBM",
            "02. open": "172.5000",
            "03. high": "174.1000",
            "04. low": "171.2000",
            "05. price": "173.9000",
            "06. volume": "3046227",
            "07. latest trading day": "2024-03-01",
            "08. previous close": "172.3000",
            "09. change": "1.6000",
            "10. change percent": "0.9286%"
        }
    }"#;

    #[test]
    fn populated_record_parses_into_quote() {
        let quote = classify_quote_body(IBM_BODY).expect("valid body");
        assert_eq!(quote.symbol.as_str(), "IBM");
    }

    #[test]
    fn empty_record_means_no_data() {
        assert_eq!(
            classify_quote_body(r#"{"Global Quote": {}}"#),
            Err(FetchFailure::NoDataForSymbol)
        );
        assert_eq!(classify_quote_body("{}"), Err(FetchFailure::NoDataForSymbol));
    }

    #[test]
    fn plain_text_is_preserved_verbatim() {
        let body = "<html>503 Service Unavailable</html>";
        assert_eq!(
            classify_quote_body(body),
            Err(FetchFailure::UnexpectedResponseBody(body.to_owned()))
        );
    }

    #[test]
    fn throttle_notice_is_unexpected_body() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;
        assert_eq!(
            classify_quote_body(body),
            Err(FetchFailure::UnexpectedResponseBody(body.to_owned()))
        );
    }

    #[test]
    fn incomplete_record_is_invalid_quote() {
        let body = r#"{"Global Quote": {"01. symbol": "IBM"}}"#;
        assert_eq!(
            classify_quote_body(body),
            Err(FetchFailure::InvalidQuote(ValidationError::MissingField {
                field: "02. open"
            }))
        );
    }
}
