use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::quote::string_record;
use crate::{FetchFailure, Symbol};

/// Company name and industry from the provider's `OVERVIEW` function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyOverview {
    pub symbol: Symbol,
    pub name: String,
    pub industry: Option<String>,
    pub raw: BTreeMap<String, String>,
}

impl CompanyOverview {
    /// Build an overview from a decoded response body. A body without a
    /// `Name` is handed back verbatim so the operator can read it.
    pub fn from_json(symbol: Symbol, body: &Value, raw_text: &str) -> Result<Self, FetchFailure> {
        let raw = string_record(body);
        let name = raw
            .get("Name")
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| FetchFailure::UnexpectedResponseBody(raw_text.to_owned()))?
            .to_owned();
        let industry = raw
            .get("Industry")
            .map(|industry| industry.trim().to_owned())
            .filter(|industry| !industry.is_empty());

        Ok(Self {
            symbol,
            name,
            industry,
            raw,
        })
    }
}
