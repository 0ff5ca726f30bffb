//! Scoring rules.
//!
//! Each rule pairs a computed value with a threshold and a direction. Evaluation
//! compares, formats, and classifies in one step and yields an immutable
//! [`Criterion`].

use crate::config::ScoringConfig;
use crate::resolver::ResolvedFinancials;
use scorecard_core::{
    Criterion, Direction, FinancialRatios, Instrument, ReportingPeriodMode, RuleId, Verdict,
};

/// How a rule's value and target are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    /// x100 with a percent sign
    Percentage,
    /// Two decimals, or millions with the currency unit at 1000 and above
    Amount,
    /// Valuation multiple compared against a computed fair multiple
    Multiple,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    pub value: f64,
    pub threshold: f64,
    pub direction: Direction,
    pub format: DisplayFormat,
}

impl Rule {
    pub fn evaluate(&self, currency: &str) -> Criterion {
        let favorable = self.direction.passes(self.value, self.threshold);
        let verdict = match (self.format, favorable) {
            (DisplayFormat::Multiple, true) => Verdict::Cheap,
            (DisplayFormat::Multiple, false) => Verdict::Expensive,
            (_, true) => Verdict::Pass,
            (_, false) => Verdict::Fail,
        };

        let symbol = self.direction.symbol();
        let (value, target) = match self.format {
            DisplayFormat::Percentage => (
                format_percentage(self.value),
                format!("{} {:.0}%", symbol, self.threshold * 100.0),
            ),
            DisplayFormat::Amount => (
                format_amount(self.value, currency),
                format!("{} {:.2}", symbol, self.threshold),
            ),
            DisplayFormat::Multiple => (
                format!("{:.2}", self.value),
                format!("{} {:.2} (fair)", symbol, self.threshold),
            ),
        };

        tracing::debug!(
            rule = %self.id,
            value = self.value,
            threshold = self.threshold,
            verdict = verdict.to_label(),
            "criterion evaluated"
        );

        Criterion {
            rule: self.id,
            name: self.name.clone(),
            category: self.id.category(),
            raw_value: self.value,
            threshold: self.threshold,
            direction: self.direction,
            value,
            target,
            verdict,
        }
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_amount(value: f64, currency: &str) -> String {
    if value.abs() < 1000.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.1} M {}", value / 1_000_000.0, currency)
    }
}

/// Currency unit shown next to large amounts.
pub fn display_currency(instrument: &Instrument, config: &ScoringConfig) -> String {
    if instrument.is_domestic_listing {
        return config.domestic_currency.clone();
    }
    instrument
        .currency
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| config.default_currency.clone())
}

/// The fixed rule set, in report order.
pub fn rule_set(
    ratios: &FinancialRatios,
    financials: &ResolvedFinancials,
    mode: ReportingPeriodMode,
    config: &ScoringConfig,
) -> Vec<Rule> {
    let threshold = |id: RuleId| config.threshold(id, mode);
    let period = mode.to_label();

    vec![
        Rule {
            id: RuleId::RevenueGrowth,
            name: format!("Revenue Growth ({})", period),
            value: ratios.revenue_growth,
            threshold: threshold(RuleId::RevenueGrowth),
            direction: Direction::HigherIsBetter,
            format: DisplayFormat::Percentage,
        },
        Rule {
            id: RuleId::EbitdaGrowth,
            name: format!("EBITDA Growth ({})", period),
            value: ratios.ebitda_growth,
            threshold: threshold(RuleId::EbitdaGrowth),
            direction: Direction::HigherIsBetter,
            format: DisplayFormat::Percentage,
        },
        Rule {
            id: RuleId::NetIncomePositive,
            name: "Net Income Positive".to_string(),
            value: financials.net_income,
            threshold: threshold(RuleId::NetIncomePositive),
            direction: Direction::HigherIsBetter,
            format: DisplayFormat::Amount,
        },
        Rule {
            id: RuleId::ReturnOnEquity,
            name: "Return on Equity (ROE)".to_string(),
            value: ratios.roe,
            threshold: threshold(RuleId::ReturnOnEquity),
            direction: Direction::HigherIsBetter,
            format: DisplayFormat::Percentage,
        },
        Rule {
            id: RuleId::CurrentRatio,
            name: "Current Ratio".to_string(),
            value: ratios.current_ratio,
            threshold: threshold(RuleId::CurrentRatio),
            direction: Direction::HigherIsBetter,
            format: DisplayFormat::Amount,
        },
        Rule {
            id: RuleId::Leverage,
            name: "Leverage Ratio".to_string(),
            value: ratios.leverage,
            threshold: threshold(RuleId::Leverage),
            direction: Direction::LowerIsBetter,
            format: DisplayFormat::Percentage,
        },
        Rule {
            id: RuleId::PriceToBook,
            name: "Price-to-Book (P/B)".to_string(),
            value: ratios.price_to_book,
            threshold: ratios.fair_price_to_book,
            direction: Direction::LowerIsBetter,
            format: DisplayFormat::Multiple,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(value: f64, threshold: f64, direction: Direction, format: DisplayFormat) -> Rule {
        Rule {
            id: RuleId::CurrentRatio,
            name: "test".to_string(),
            value,
            threshold,
            direction,
            format,
        }
    }

    #[test]
    fn test_direction_decides_verdict() {
        let higher = rule(1.5, 1.2, Direction::HigherIsBetter, DisplayFormat::Amount);
        assert_eq!(higher.evaluate("USD").verdict, Verdict::Pass);

        let at_threshold = rule(1.2, 1.2, Direction::HigherIsBetter, DisplayFormat::Amount);
        assert_eq!(at_threshold.evaluate("USD").verdict, Verdict::Fail);

        let lower = rule(0.6, 0.7, Direction::LowerIsBetter, DisplayFormat::Percentage);
        assert_eq!(lower.evaluate("USD").verdict, Verdict::Pass);
    }

    #[test]
    fn test_percentage_formatting() {
        let criterion = rule(0.25, 0.40, Direction::HigherIsBetter, DisplayFormat::Percentage)
            .evaluate("USD");
        assert_eq!(criterion.value, "25.0%");
        assert_eq!(criterion.target, "> 40%");

        let leverage = rule(0.6, 0.7, Direction::LowerIsBetter, DisplayFormat::Percentage)
            .evaluate("USD");
        assert_eq!(leverage.value, "60.0%");
        assert_eq!(leverage.target, "< 70%");
    }

    #[test]
    fn test_amount_formatting_switches_to_millions() {
        assert_eq!(format_amount(50.0, "USD"), "50.00");
        assert_eq!(format_amount(999.994, "USD"), "999.99");
        assert_eq!(format_amount(2_500_000.0, "TRY"), "2.5 M TRY");
        assert_eq!(format_amount(-1_340_000.0, "EUR"), "-1.3 M EUR");

        let criterion = rule(1.5, 1.2, Direction::HigherIsBetter, DisplayFormat::Amount)
            .evaluate("USD");
        assert_eq!(criterion.value, "1.50");
        assert_eq!(criterion.target, "> 1.20");
    }

    #[test]
    fn test_valuation_uses_cheap_and_expensive() {
        let cheap =
            rule(1.0, 1.25, Direction::LowerIsBetter, DisplayFormat::Multiple).evaluate("USD");
        assert_eq!(cheap.verdict, Verdict::Cheap);
        assert_eq!(cheap.value, "1.00");
        assert_eq!(cheap.target, "< 1.25 (fair)");

        let expensive =
            rule(0.0, 0.0, Direction::LowerIsBetter, DisplayFormat::Multiple).evaluate("USD");
        assert_eq!(expensive.verdict, Verdict::Expensive);
    }

    #[test]
    fn test_display_currency() {
        let config = ScoringConfig::default();
        let domestic = Instrument {
            ticker: "GZNMI.IS".to_string(),
            currency: Some("USD".to_string()),
            is_domestic_listing: true,
            ..Default::default()
        };
        assert_eq!(display_currency(&domestic, &config), "TRY");

        let foreign = Instrument {
            ticker: "SAP".to_string(),
            currency: Some("EUR".to_string()),
            ..Default::default()
        };
        assert_eq!(display_currency(&foreign, &config), "EUR");

        let unknown = Instrument {
            ticker: "XYZ".to_string(),
            ..Default::default()
        };
        assert_eq!(display_currency(&unknown, &config), "USD");
    }

    #[test]
    fn test_rule_set_order_and_thresholds() {
        let config = ScoringConfig::default();
        let rules = rule_set(
            &FinancialRatios::default(),
            &ResolvedFinancials::default(),
            ReportingPeriodMode::Quarterly,
            &config,
        );
        let ids: Vec<RuleId> = rules.iter().map(|r| r.id).collect();
        assert_eq!(ids, RuleId::ALL.to_vec());
        assert_eq!(rules[0].name, "Revenue Growth (Quarterly)");
        assert_eq!(rules[3].threshold, 0.30);
        assert_eq!(rules[5].threshold, 0.75);
    }
}
