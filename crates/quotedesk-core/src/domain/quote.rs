use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::{MetricError, Symbol, ValidationError};

/// Decimal places kept by derived metrics.
pub const METRIC_SCALE: u32 = 4;

/// Largest magnitude accepted for any price or change field.
pub const MAX_PRICE_MAGNITUDE: i64 = 1_000_000_000_000;

pub(crate) const FIELD_SYMBOL: &str = "01. symbol";
pub(crate) const FIELD_OPEN: &str = "02. open";
pub(crate) const FIELD_HIGH: &str = "03. high";
pub(crate) const FIELD_LOW: &str = "04. low";
pub(crate) const FIELD_PRICE: &str = "05. price";
pub(crate) const FIELD_VOLUME: &str = "06. volume";
pub(crate) const FIELD_CHANGE: &str = "09. change";
pub(crate) const FIELD_CHANGE_PERCENT: &str = "10. change percent";

/// Direction of a numeric comparison, used for color cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Up,
    Down,
    Flat,
}

impl Sentiment {
    /// Classify `value` against `reference`.
    pub fn classify(value: Decimal, reference: Decimal) -> Self {
        match value.cmp(&reference) {
            Ordering::Greater => Self::Up,
            Ordering::Less => Self::Down,
            Ordering::Equal => Self::Flat,
        }
    }
}

/// Validated point-in-time snapshot of one ticker.
///
/// Built once from a provider record and never mutated. The `low <= open,
/// price <= high` relation is not enforced: providers occasionally violate it
/// and the values are reported as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: Symbol,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub price: Decimal,
    pub volume: u64,
    pub last_change: Decimal,
    /// Provider-formatted percent change, usually with a trailing `%`.
    pub last_change_pct: String,
    pub raw: BTreeMap<String, String>,
}

impl Quote {
    /// Parse a `GLOBAL_QUOTE` record.
    pub fn parse(payload: &BTreeMap<String, String>) -> Result<Self, ValidationError> {
        let symbol = Symbol::parse(required(payload, FIELD_SYMBOL)?)?;

        Ok(Self {
            symbol,
            open: decimal_field(payload, FIELD_OPEN)?,
            high: decimal_field(payload, FIELD_HIGH)?,
            low: decimal_field(payload, FIELD_LOW)?,
            price: decimal_field(payload, FIELD_PRICE)?,
            volume: volume_field(payload, FIELD_VOLUME)?,
            last_change: decimal_field(payload, FIELD_CHANGE)?,
            last_change_pct: required(payload, FIELD_CHANGE_PERCENT)?.trim().to_owned(),
            raw: payload.clone(),
        })
    }

    /// Parse a record straight from decoded JSON. Scalar values are
    /// stringified; nulls are dropped so they count as missing.
    pub fn from_json(record: &Value) -> Result<Self, ValidationError> {
        Self::parse(&string_record(record))
    }

    /// `price - open`, rounded. Parsed quotes stay within
    /// [`MAX_PRICE_MAGNITUDE`], so this is exact; hand-built quotes saturate.
    pub fn day_change(&self) -> Decimal {
        self.price.saturating_sub(self.open).round_dp(METRIC_SCALE)
    }

    /// `(price - open) / open * 100`, rounded.
    pub fn day_change_pct(&self) -> Result<Decimal, MetricError> {
        if self.open.is_zero() {
            return Err(MetricError::DivisionByZero);
        }
        self.price
            .checked_sub(self.open)
            .and_then(|change| change.checked_div(self.open))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|pct| pct.round_dp(METRIC_SCALE))
            .ok_or(MetricError::Overflow)
    }

    pub fn since_open_sentiment(&self) -> Sentiment {
        Sentiment::classify(self.price, self.open)
    }

    /// Sign of the provider's absolute change. Independent of the open price.
    pub fn last_change_sentiment(&self) -> Sentiment {
        Sentiment::classify(self.last_change, Decimal::ZERO)
    }

    /// Numeric magnitude of the provider percent string, `%` stripped.
    pub fn last_change_pct_value(&self) -> Option<Decimal> {
        let trimmed = self.last_change_pct.trim().trim_end_matches('%').trim();
        Decimal::from_str(trimmed).ok()
    }

    /// Percent string for display; appends `%` only when the provider omitted it.
    pub fn last_change_pct_display(&self) -> String {
        if self.last_change_pct.ends_with('%') {
            self.last_change_pct.clone()
        } else {
            format!("{}%", self.last_change_pct)
        }
    }

    /// Pretty-printed copy of the original provider record.
    pub fn raw_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.raw)
    }
}

impl Display for Quote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - Open: {}, High: {}, Low: {}, Price: {}, Volume: {}, Change: {}, Change %: {}",
            self.symbol,
            self.open,
            self.high,
            self.low,
            self.price,
            self.volume,
            self.last_change,
            self.last_change_pct
        )
    }
}

pub(crate) fn string_record(record: &Value) -> BTreeMap<String, String> {
    let Some(object) = record.as_object() else {
        return BTreeMap::new();
    };

    object
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), text))
        })
        .collect()
}

fn required<'a>(
    payload: &'a BTreeMap<String, String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    payload
        .get(field)
        .map(String::as_str)
        .ok_or(ValidationError::MissingField { field })
}

fn decimal_field(
    payload: &BTreeMap<String, String>,
    field: &'static str,
) -> Result<Decimal, ValidationError> {
    let value = required(payload, field)?;
    let parsed = Decimal::from_str(value.trim()).map_err(|_| ValidationError::MalformedNumber {
        field,
        value: value.to_owned(),
    })?;
    if parsed.abs() > Decimal::from(MAX_PRICE_MAGNITUDE) {
        return Err(ValidationError::OutOfRange {
            field,
            value: value.to_owned(),
        });
    }
    Ok(parsed)
}

fn volume_field(
    payload: &BTreeMap<String, String>,
    field: &'static str,
) -> Result<u64, ValidationError> {
    let value = required(payload, field)?;
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::MalformedNumber {
            field,
            value: value.to_owned(),
        })
}
