//! Pure parsers for Yahoo Finance responses.

use chrono::NaiveDate;
use scorecard_core::{MarketData, StatementSnapshot};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::labels::key_to_label;

/// Price metadata from the chart endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartMeta {
    pub currency: Option<String>,
    pub has_prices: bool,
}

/// Parse the chart response. `None` when Yahoo reports no result for the symbol.
pub fn parse_chart(json: &Value) -> Option<ChartMeta> {
    let result = json
        .get("chart")
        .and_then(|v| v.get("result"))
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())?;

    let currency = result
        .get("meta")
        .and_then(|m| m.get("currency"))
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let has_prices = result
        .get("timestamp")
        .and_then(|v| v.as_array())
        .is_some_and(|ts| !ts.is_empty());

    Some(ChartMeta {
        currency,
        has_prices,
    })
}

/// Parse a fundamentals time-series response into a statement.
///
/// `prefix` is the period prefix of the requested types (`annual` or
/// `quarterly`). Rows are aligned on the union of period dates,
/// most-recent-first, with `None` where a row has no value for a date.
pub fn parse_timeseries(json: &Value, prefix: &str) -> StatementSnapshot {
    let results = json
        .get("timeseries")
        .and_then(|v| v.get("result"))
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();

    let mut by_label: BTreeMap<String, BTreeMap<NaiveDate, f64>> = BTreeMap::new();

    for result in &results {
        let Some(series_type) = result
            .get("meta")
            .and_then(|m| m.get("type"))
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
            .and_then(|v| v.as_str())
        else {
            continue;
        };
        let Some(key) = series_type.strip_prefix(prefix) else {
            continue;
        };
        let Some(points) = result.get(series_type).and_then(|v| v.as_array()) else {
            continue;
        };

        let values = by_label.entry(key_to_label(key)).or_default();
        for point in points {
            let date = point
                .get("asOfDate")
                .and_then(|v| v.as_str())
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
            let raw = point
                .get("reportedValue")
                .and_then(|v| v.get("raw"))
                .and_then(|v| v.as_f64());
            if let (Some(date), Some(raw)) = (date, raw) {
                values.insert(date, raw);
            }
        }
    }

    let periods: Vec<NaiveDate> = by_label
        .values()
        .flat_map(|values| values.keys().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect();

    let rows = by_label
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(label, values)| {
            let row = periods.iter().map(|date| values.get(date).copied()).collect();
            (label, row)
        })
        .collect();

    StatementSnapshot { periods, rows }
}

/// Parse the quote endpoint into market data and the listing currency.
pub fn parse_quote(json: &Value) -> Option<(MarketData, Option<String>)> {
    let quote = json
        .get("quoteResponse")
        .and_then(|v| v.get("result"))
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())?;

    let market = MarketData {
        price_to_book: quote.get("priceToBook").and_then(|v| v.as_f64()),
        market_cap: quote.get("marketCap").and_then(|v| v.as_f64()),
    };
    let currency = quote
        .get("currency")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    Some((market, currency))
}
