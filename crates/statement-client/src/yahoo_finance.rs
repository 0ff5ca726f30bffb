use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use scorecard_core::{
    AnalysisError, FinancialSnapshot, Instrument, MarketData, ReportingPeriodMode,
    StatementSnapshot, StatementSource,
};
use serde_json::Value;
use std::time::Duration;

use crate::labels::{BALANCE_KEYS, INCOME_KEYS};
use crate::parse::{parse_chart, parse_quote, parse_timeseries};

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
const CHART_PATH: &str = "/v8/finance/chart";
const QUOTE_PATH: &str = "/v7/finance/quote";
const TIMESERIES_PATH: &str = "/ws/fundamentals-timeseries/v1/finance/timeseries";

/// Exchange suffix of Borsa Istanbul listings.
pub const DOMESTIC_SUFFIX: &str = ".IS";
const DOMESTIC_CURRENCY: &str = "TRY";

/// Earliest period requested from the time-series endpoint (2016-01-01).
const TIMESERIES_START: i64 = 1_451_606_400;
const MAX_ATTEMPTS: u32 = 3;
const RETRY_WAIT_SECS: u64 = 5;

/// A ticker resolved to a listing that has recent price data.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSymbol {
    pub symbol: String,
    pub currency: Option<String>,
    pub is_domestic_listing: bool,
}

/// Symbols to try for a user-entered ticker, domestic listing first.
pub fn symbol_candidates(ticker: &str) -> Vec<String> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.contains('.') {
        return vec![ticker];
    }
    vec![format!("{}{}", ticker, DOMESTIC_SUFFIX), ticker]
}

fn statement_types(prefix: &str, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| format!("{}{}", prefix, key))
        .collect::<Vec<_>>()
        .join(",")
}

fn period_prefix(mode: ReportingPeriodMode) -> &'static str {
    match mode {
        ReportingPeriodMode::Annual => "annual",
        ReportingPeriodMode::Quarterly => "quarterly",
    }
}

#[derive(Clone)]
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
    retry_wait: Duration,
}

impl YahooFinanceClient {
    /// Build a client. `YAHOO_TIMEOUT_SECS` overrides the 30 second request timeout.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against another host serving the same endpoints.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let timeout_secs: u64 = std::env::var("YAHOO_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("HTTP client setup failed ({}), using defaults without timeout", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry_wait: Duration::from_secs(RETRY_WAIT_SECS),
        }
    }

    /// Wait between attempts after an HTTP 429.
    pub fn with_retry_wait(mut self, retry_wait: Duration) -> Self {
        self.retry_wait = retry_wait;
        self
    }

    /// GET a JSON document, retrying on HTTP 429. `Ok(None)` on 404.
    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<Value>, AnalysisError> {
        let url = format!("{}{}", self.base_url, path);
        for attempt in 1..=MAX_ATTEMPTS {
            let response = self
                .client
                .get(&url)
                .query(query)
                .send()
                .await
                .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

            match response.status() {
                StatusCode::TOO_MANY_REQUESTS => {
                    if attempt < MAX_ATTEMPTS {
                        tracing::warn!(
                            "Yahoo 429 rate limited, waiting {:?} before retry {}/{}",
                            self.retry_wait,
                            attempt + 1,
                            MAX_ATTEMPTS
                        );
                        tokio::time::sleep(self.retry_wait).await;
                    }
                }
                StatusCode::NOT_FOUND => return Ok(None),
                status if !status.is_success() => {
                    return Err(AnalysisError::ApiError(format!("HTTP {} from {}", status, url)));
                }
                _ => {
                    let json = response
                        .json()
                        .await
                        .map_err(|e| AnalysisError::InvalidData(format!("{}: {}", url, e)))?;
                    return Ok(Some(json));
                }
            }
        }

        Err(AnalysisError::ApiError(format!(
            "Rate limited by Yahoo after {} attempts",
            MAX_ATTEMPTS
        )))
    }

    /// Find the listing for a ticker: `<TICKER>.IS` first, then the bare ticker.
    pub async fn resolve_symbol(&self, ticker: &str) -> Result<ResolvedSymbol, AnalysisError> {
        for symbol in symbol_candidates(ticker) {
            let path = format!("{}/{}", CHART_PATH, symbol);
            let query = [("range", "5d".to_string()), ("interval", "1d".to_string())];
            let Some(json) = self.get_json(&path, &query).await? else {
                continue;
            };
            let Some(meta) = parse_chart(&json) else {
                continue;
            };
            if !meta.has_prices {
                tracing::debug!("{} has no recent prices, trying next listing", symbol);
                continue;
            }

            let is_domestic_listing = symbol.ends_with(DOMESTIC_SUFFIX);
            let currency = if is_domestic_listing {
                Some(DOMESTIC_CURRENCY.to_string())
            } else {
                meta.currency
            };
            tracing::info!(
                "Resolved {} to {} ({})",
                ticker,
                symbol,
                currency.as_deref().unwrap_or("?")
            );
            return Ok(ResolvedSymbol {
                symbol,
                currency,
                is_domestic_listing,
            });
        }

        Err(AnalysisError::SymbolNotFound(ticker.to_string()))
    }

    /// Fetch one statement for the given time-series keys.
    pub async fn get_statement(
        &self,
        symbol: &str,
        mode: ReportingPeriodMode,
        keys: &[&str],
    ) -> Result<StatementSnapshot, AnalysisError> {
        let prefix = period_prefix(mode);
        let path = format!("{}/{}", TIMESERIES_PATH, symbol);
        let query = [
            ("symbol", symbol.to_string()),
            ("type", statement_types(prefix, keys)),
            ("period1", TIMESERIES_START.to_string()),
            ("period2", Utc::now().timestamp().to_string()),
        ];

        let statement = match self.get_json(&path, &query).await? {
            Some(json) => parse_timeseries(&json, prefix),
            None => StatementSnapshot::default(),
        };
        tracing::debug!(
            "{} {} statement: {} rows, {} periods",
            symbol,
            prefix,
            statement.rows.len(),
            statement.periods.len()
        );
        Ok(statement)
    }

    /// Price-to-book, market cap and listing currency.
    pub async fn get_market_data(
        &self,
        symbol: &str,
    ) -> Result<(MarketData, Option<String>), AnalysisError> {
        let json = self
            .get_json(QUOTE_PATH, &[("symbols", symbol.to_string())])
            .await?
            .ok_or_else(|| AnalysisError::SymbolNotFound(symbol.to_string()))?;

        parse_quote(&json)
            .ok_or_else(|| AnalysisError::ApiError(format!("No quote data found for {}", symbol)))
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatementSource for YahooFinanceClient {
    async fn fetch(
        &self,
        ticker: &str,
        mode: ReportingPeriodMode,
    ) -> Result<FinancialSnapshot, AnalysisError> {
        let resolved = self.resolve_symbol(ticker).await?;

        let income_statement = self.get_statement(&resolved.symbol, mode, INCOME_KEYS).await?;
        let balance_sheet = self.get_statement(&resolved.symbol, mode, BALANCE_KEYS).await?;

        // Quote metadata is optional: price-to-book falls back to market cap / equity.
        let (market, quote_currency) = match self.get_market_data(&resolved.symbol).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Quote unavailable for {}: {}", resolved.symbol, e);
                (MarketData::default(), None)
            }
        };

        Ok(FinancialSnapshot {
            instrument: Instrument {
                ticker: resolved.symbol,
                currency: resolved.currency.or(quote_currency),
                is_domestic_listing: resolved.is_domestic_listing,
                reporting_period_mode: mode,
            },
            income_statement,
            balance_sheet,
            market,
        })
    }
}
