//! Yahoo Finance statement source.
//!
//! Resolves a ticker to a listing (Borsa Istanbul first, then the bare
//! symbol), fetches the income statement and balance sheet from the
//! fundamentals time-series endpoint, and reads price-to-book and market cap
//! from the quote endpoint.

pub mod labels;
pub mod parse;
pub mod yahoo_finance;

pub use yahoo_finance::{symbol_candidates, ResolvedSymbol, YahooFinanceClient};
