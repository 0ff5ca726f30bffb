use crate::config::ScoringConfig;
use crate::resolver::ResolvedFinancials;
use scorecard_core::{FinancialRatios, ReportingPeriodMode};

/// Division that defines x / 0 as 0.0.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn current_ratio(current_assets: f64, current_liabilities: f64) -> f64 {
    safe_div(current_assets, current_liabilities)
}

pub fn working_capital(current_assets: f64, current_liabilities: f64) -> f64 {
    current_assets - current_liabilities
}

pub fn leverage(total_liabilities: f64, total_assets: f64) -> f64 {
    safe_div(total_liabilities, total_assets)
}

pub fn growth(current: f64, prior: f64) -> f64 {
    safe_div(current - prior, prior)
}

/// Growth over |prior| so a negative base does not flip the sign.
pub fn ebitda_growth(current: f64, prior: f64) -> f64 {
    safe_div(current - prior, prior.abs())
}

pub fn return_on_equity(net_income: f64, equity: f64, annualization: f64) -> f64 {
    safe_div(net_income, equity) * annualization
}

/// Quoted price-to-book if present, else market cap / equity when both are
/// positive, else 0.0.
pub fn price_to_book(quote: Option<f64>, market_cap: Option<f64>, equity: f64) -> f64 {
    if let Some(pb) = quote {
        return pb;
    }
    match market_cap {
        Some(cap) if cap > 0.0 && equity > 0.0 => cap / equity,
        _ => 0.0,
    }
}

/// A firm earning ROE r is taken to deserve a book multiple of `multiplier * r`.
pub fn fair_price_to_book(roe: f64, multiplier: f64) -> f64 {
    roe * multiplier
}

pub fn compute(
    financials: &ResolvedFinancials,
    mode: ReportingPeriodMode,
    config: &ScoringConfig,
) -> FinancialRatios {
    let roe = return_on_equity(
        financials.net_income,
        financials.equity,
        config.roe_annualization.for_mode(mode),
    );

    FinancialRatios {
        current_ratio: current_ratio(financials.current_assets, financials.current_liabilities),
        working_capital: working_capital(financials.current_assets, financials.current_liabilities),
        leverage: leverage(financials.total_liabilities, financials.total_assets),
        revenue_growth: growth(financials.revenue, financials.prior_revenue),
        ebitda_growth: ebitda_growth(financials.ebitda, financials.prior_ebitda),
        roe,
        price_to_book: price_to_book(
            financials.price_to_book,
            financials.market_cap,
            financials.equity,
        ),
        fair_price_to_book: fair_price_to_book(roe, config.fair_price_to_book_multiplier),
    }
}
