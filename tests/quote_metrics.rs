//! Behavior-driven tests for quote metrics and rendering
//!
//! These tests sweep a range of open/price pairs to check that derived
//! metrics, sentiment, and rendering hold for every input, not just the
//! happy path.

use std::collections::BTreeMap;
use std::str::FromStr;

use quotedesk_core::{
    render_interactive, render_report, AnsiStyler, MetricError, Quote, Sentiment, ValidationError,
};
use rust_decimal::Decimal;

const PRICES: [&str; 9] = [
    "0.0001", "0.5000", "1.0000", "9.9999", "10.0000", "99.1234", "172.5000", "1000.0000",
    "54321.9876",
];

fn quote(open: &str, price: &str, change: &str) -> Quote {
    let record: BTreeMap<String, String> = [
        ("01. symbol", "TEST"),
        ("02. open", open),
        ("03. high", "60000.0000"),
        ("04. low", "0.0000"),
        ("05. price", price),
        ("06. volume", "42"),
        ("09. change", change),
        ("10. change percent", "1.2345%"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_owned(), value.to_owned()))
    .collect();
    Quote::parse(&record).expect("valid record")
}

fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).expect("decimal literal")
}

// =============================================================================
// Derived Metrics
// =============================================================================

#[test]
fn percent_change_matches_worked_examples() {
    // (open, price, day change, percent change), computed by hand
    let cases = [
        // Reference IBM session: 1.4 / 172.5 * 100 = 0.81159...
        ("172.5000", "173.9000", "1.4000", "0.8116"),
        ("100.0000", "97.5000", "-2.5000", "-2.5000"),
        ("3.0000", "4.0000", "1.0000", "33.3333"),
        // -66.66666... rounds away at the fourth place
        ("3.0000", "1.0000", "-2.0000", "-66.6667"),
        ("0.0003", "0.0004", "0.0001", "33.3333"),
        ("10.0000", "10.0000", "0", "0"),
    ];

    for (open, price, change, pct) in cases {
        let quote = quote(open, price, "0");

        assert_eq!(quote.day_change(), dec(change), "open={open} price={price}");
        assert_eq!(
            quote.day_change_pct(),
            Ok(dec(pct)),
            "open={open} price={price}"
        );
    }
}

#[test]
fn percent_change_agrees_with_direction_for_every_positive_open() {
    for open in PRICES {
        for price in PRICES {
            // Given: A quote with a non-zero open
            let quote = quote(open, price, "0");

            // When: The since-open metrics are computed
            let pct = quote.day_change_pct().expect("open is positive");
            let change = quote.day_change();

            // Then: Both carry the same direction as price against open
            let expected = quote.since_open_sentiment();
            assert_eq!(
                Sentiment::classify(change, Decimal::ZERO),
                expected,
                "open={open} price={price}"
            );
            if !pct.is_zero() {
                assert_eq!(
                    Sentiment::classify(pct, Decimal::ZERO),
                    expected,
                    "open={open} price={price}"
                );
            }
            assert!(pct.scale() <= 4, "open={open} price={price}");
        }
    }
}

#[test]
fn zero_open_is_not_applicable_rather_than_a_crash() {
    for price in PRICES {
        let quote = quote("0", price, "0");

        assert_eq!(quote.day_change_pct(), Err(MetricError::DivisionByZero));
        assert!(render_report(&quote).contains(" | N/A\n"));
    }
}

#[test]
fn overflowing_percent_is_not_applicable_rather_than_a_crash() {
    // Given: An open so small that the percent change exceeds a decimal
    let quote = quote("0.0000000000000000000001", "1000000000000", "0");

    // Then: The metric reports overflow, not a zero open, and still renders
    assert_eq!(quote.day_change_pct(), Err(MetricError::Overflow));
    assert!(render_report(&quote).contains(" | N/A\n"));
}

#[test]
fn out_of_range_prices_are_rejected_at_parse_time() {
    let mut record = quote("10", "11", "1").raw;
    record.insert(String::from("05. price"), String::from("10000000000000"));

    assert!(matches!(
        Quote::parse(&record),
        Err(ValidationError::OutOfRange { field: "05. price", .. })
    ));
}

#[test]
fn sentiment_is_total_over_every_pair() {
    for open in PRICES {
        for price in PRICES {
            let sentiment = Sentiment::classify(dec(price), dec(open));
            let expected = if dec(price) > dec(open) {
                Sentiment::Up
            } else if dec(price) < dec(open) {
                Sentiment::Down
            } else {
                Sentiment::Flat
            };
            assert_eq!(sentiment, expected, "open={open} price={price}");
        }
    }
}

#[test]
fn last_change_sentiment_follows_sign_only() {
    assert_eq!(quote("10", "10", "-0.0100").last_change_sentiment(), Sentiment::Down);
    assert_eq!(quote("10", "10", "0.0000").last_change_sentiment(), Sentiment::Flat);
    assert_eq!(quote("10", "9", "2.5").last_change_sentiment(), Sentiment::Up);
}

#[test]
fn inverted_range_is_reported_as_given() {
    let mut record: BTreeMap<String, String> = quote("10", "11", "1").raw;
    record.insert(String::from("03. high"), String::from("5.0000"));
    record.insert(String::from("04. low"), String::from("20.0000"));

    let quote = Quote::parse(&record).expect("range violations are not rejected");

    assert!(render_report(&quote).contains("Range: $20.0000 -> $5.0000\n"));
}

// =============================================================================
// Rendering Purity
// =============================================================================

#[test]
fn rendering_twice_yields_identical_output() {
    let quote = quote("172.5000", "173.9000", "1.6000");

    assert_eq!(render_report(&quote), render_report(&quote));
    assert_eq!(
        render_interactive(&quote, &AnsiStyler),
        render_interactive(&quote, &AnsiStyler)
    );
}

#[test]
fn report_block_is_plain_text_with_trailing_blank_line() {
    let block = render_report(&quote("172.5000", "173.9000", "1.6000"));

    assert!(!block.contains('\x1b'), "report must not carry color codes");
    assert!(block.ends_with("trades.\n\n"));
    assert_eq!(block.lines().count(), 7);
}
