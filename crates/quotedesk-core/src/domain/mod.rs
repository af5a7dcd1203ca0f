//! # Domain Models
//!
//! Validated types produced at the provider parse boundary.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Quote`] | One `GLOBAL_QUOTE` snapshot with derived day-change metrics |
//! | [`Sentiment`] | Up/Down/Flat classification used for color cues |
//! | [`CompanyOverview`] | Company name and industry |
//! | [`Symbol`] | Validated, upper-cased ticker |
//!
//! Provider records arrive as loosely-typed string maps. Nothing past
//! [`Quote::parse`] sees them except through [`Quote::raw`], which is kept
//! for the diagnostic dump.

mod overview;
pub(crate) mod quote;
mod symbol;

pub use overview::CompanyOverview;
pub use quote::{Quote, Sentiment, MAX_PRICE_MAGNITUDE, METRIC_SCALE};
pub use symbol::Symbol;
