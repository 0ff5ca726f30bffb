//! Composite solvency score, an Altman Z-Score analogue.
//!
//! ```text
//! t1 = working capital / total assets
//! t2 = retained earnings / total assets
//! t3 = EBITDA * scale / total assets
//! t4 = equity / total liabilities
//! score = 6.56*t1 + 3.26*t2 + 6.72*t3 + 1.05*t4
//! ```
//!
//! `scale` is 0.8 for a trailing annual EBITDA and 4 for a single quarter.
//! Weights and band cut-offs come from [`RiskModel`].

use crate::config::RiskModel;
use crate::ratios::safe_div;
use crate::resolver::ResolvedFinancials;
use scorecard_core::RiskBand;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskComponents {
    pub working_capital_to_assets: f64,
    pub retained_earnings_to_assets: f64,
    pub ebitda_to_assets: f64,
    pub equity_to_liabilities: f64,
}

impl RiskComponents {
    pub fn from_financials(
        financials: &ResolvedFinancials,
        working_capital: f64,
        ebitda_scale: f64,
    ) -> Self {
        Self {
            working_capital_to_assets: safe_div(working_capital, financials.total_assets),
            retained_earnings_to_assets: safe_div(
                financials.retained_earnings,
                financials.total_assets,
            ),
            ebitda_to_assets: safe_div(financials.ebitda * ebitda_scale, financials.total_assets),
            equity_to_liabilities: safe_div(financials.equity, financials.total_liabilities),
        }
    }

    pub fn score(&self, model: &RiskModel) -> f64 {
        model.working_capital_weight * self.working_capital_to_assets
            + model.retained_earnings_weight * self.retained_earnings_to_assets
            + model.ebitda_weight * self.ebitda_to_assets
            + model.equity_weight * self.equity_to_liabilities
    }
}

/// Below `distress_below` is distress, above `safe_above` is safe, the closed
/// interval between them is the grey zone.
pub fn classify(score: f64, model: &RiskModel) -> RiskBand {
    if score < model.distress_below {
        RiskBand::Distress
    } else if score > model.safe_above {
        RiskBand::Safe
    } else {
        RiskBand::GreyZone
    }
}
