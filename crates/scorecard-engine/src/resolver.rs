//! Line-item resolution.
//!
//! Statement vocabularies differ between filers, so each accounting concept is
//! a priority-ordered list of labels tried in turn against the statement.

use scorecard_core::{FinancialSnapshot, StatementSnapshot};

pub const REVENUE: &[&str] = &["Total Revenue", "Operating Revenue"];
pub const EBITDA: &[&str] = &["EBITDA", "Normalized EBITDA"];
pub const OPERATING_INCOME: &[&str] = &["Operating Income"];
pub const NET_INCOME: &[&str] = &["Net Income", "Net Income Common Stockholders"];
pub const CURRENT_ASSETS: &[&str] = &["Current Assets", "Total Current Assets"];
pub const CURRENT_LIABILITIES: &[&str] = &["Current Liabilities", "Total Current Liabilities"];
pub const TOTAL_ASSETS: &[&str] = &["Total Assets"];
pub const TOTAL_LIABILITIES: &[&str] =
    &["Total Liabilities Net Minority Interest", "Total Liabilities"];
pub const EQUITY: &[&str] = &["Stockholders Equity", "Total Equity Gross Minority Interest"];
pub const RETAINED_EARNINGS: &[&str] = &["Retained Earnings"];

/// Look up the first candidate label that has a value slot at `period_offset`.
///
/// Returns `None` when no candidate covers the period or the slot is null/NaN.
/// A candidate whose row is too short is skipped; a null slot ends the search.
pub fn lookup(
    statement: &StatementSnapshot,
    candidates: &[&str],
    period_offset: usize,
) -> Option<f64> {
    for label in candidates {
        let Some(values) = statement.row(label) else {
            continue;
        };
        if let Some(&slot) = values.get(period_offset) {
            return slot.filter(|v| !v.is_nan());
        }
    }
    None
}

/// Like `lookup`, but absence resolves to 0.0.
pub fn resolve(statement: &StatementSnapshot, candidates: &[&str], period_offset: usize) -> f64 {
    lookup(statement, candidates, period_offset).unwrap_or(0.0)
}

/// EBITDA, falling back to operating income when EBITDA is absent or zero.
fn lookup_ebitda(statement: &StatementSnapshot, period_offset: usize) -> Option<f64> {
    let primary = lookup(statement, EBITDA, period_offset);
    match primary {
        Some(v) if v != 0.0 => Some(v),
        _ => {
            let fallback = lookup(statement, OPERATING_INCOME, period_offset);
            if fallback.is_some() {
                tracing::debug!(period_offset, "EBITDA unavailable, using operating income");
            }
            fallback.or(primary)
        }
    }
}

/// The figures the scorecard needs, absent items already zeroed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolvedFinancials {
    pub revenue: f64,
    pub prior_revenue: f64,
    pub ebitda: f64,
    pub prior_ebitda: f64,
    pub net_income: f64,
    pub current_assets: f64,
    pub current_liabilities: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub equity: f64,
    pub retained_earnings: f64,
    pub price_to_book: Option<f64>,
    pub market_cap: Option<f64>,
}

/// Result of resolving a snapshot: the figures plus the names of every figure
/// that had to be zeroed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub financials: ResolvedFinancials,
    pub missing: Vec<&'static str>,
}

pub fn resolve_financials(snapshot: &FinancialSnapshot, prior_period_offset: usize) -> Resolution {
    let income = &snapshot.income_statement;
    let balance = &snapshot.balance_sheet;
    let mut missing = Vec::new();

    let mut take = |name: &'static str, value: Option<f64>| {
        value.unwrap_or_else(|| {
            missing.push(name);
            0.0
        })
    };

    let financials = ResolvedFinancials {
        revenue: take("revenue", lookup(income, REVENUE, 0)),
        prior_revenue: take("prior_revenue", lookup(income, REVENUE, prior_period_offset)),
        ebitda: take("ebitda", lookup_ebitda(income, 0)),
        prior_ebitda: take("prior_ebitda", lookup_ebitda(income, prior_period_offset)),
        net_income: take("net_income", lookup(income, NET_INCOME, 0)),
        current_assets: take("current_assets", lookup(balance, CURRENT_ASSETS, 0)),
        current_liabilities: take("current_liabilities", lookup(balance, CURRENT_LIABILITIES, 0)),
        total_assets: take("total_assets", lookup(balance, TOTAL_ASSETS, 0)),
        total_liabilities: take("total_liabilities", lookup(balance, TOTAL_LIABILITIES, 0)),
        equity: take("equity", lookup(balance, EQUITY, 0)),
        retained_earnings: take("retained_earnings", lookup(balance, RETAINED_EARNINGS, 0)),
        price_to_book: snapshot.market.price_to_book,
        market_cap: snapshot.market.market_cap,
    };
    tracing::debug!(?financials, ?missing, prior_period_offset, "resolved financial figures");

    Resolution { financials, missing }
}
