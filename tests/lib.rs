// Shared fixtures for the behaviour tests
use quotedesk_core::Symbol;

/// A `GLOBAL_QUOTE` response body with fixed range, volume and change.
pub fn global_quote_body(symbol: &str, open: &str, price: &str) -> String {
    serde_json::json!({
        "Global Quote": {
            "01. symbol": symbol,
            "02. open": open,
            "03. high": "200.0000",
            "04. low": "50.0000",
            "05. price": price,
            "06. volume": "1000",
            "09. change": "0.5000",
            "10. change percent": "0.5000%"
        }
    })
    .to_string()
}

pub fn symbols(raw: &[&str]) -> Vec<Symbol> {
    raw.iter()
        .map(|value| Symbol::parse(value).expect("valid symbol"))
        .collect()
}
