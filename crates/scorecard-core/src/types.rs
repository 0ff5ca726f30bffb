use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::AnalysisError;

/// Whether figures come from annual or quarterly statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingPeriodMode {
    #[default]
    Annual,
    Quarterly,
}

impl ReportingPeriodMode {
    /// Human-readable label for the mode
    pub fn to_label(&self) -> &'static str {
        match self {
            ReportingPeriodMode::Annual => "Annual",
            ReportingPeriodMode::Quarterly => "Quarterly",
        }
    }
}

impl fmt::Display for ReportingPeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportingPeriodMode::Annual => f.write_str("annual"),
            ReportingPeriodMode::Quarterly => f.write_str("quarterly"),
        }
    }
}

impl FromStr for ReportingPeriodMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "annual" | "yearly" => Ok(ReportingPeriodMode::Annual),
            "quarterly" | "quarter" => Ok(ReportingPeriodMode::Quarterly),
            other => Err(AnalysisError::ConfigError(format!(
                "unknown reporting period mode '{}'",
                other
            ))),
        }
    }
}

/// One financial statement: line-item label -> values ordered most-recent-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementSnapshot {
    /// Period end dates, most-recent-first. May be empty when the source has no dates.
    #[serde(default)]
    pub periods: Vec<NaiveDate>,
    pub rows: BTreeMap<String, Vec<Option<f64>>>,
}

impl StatementSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(mut self, label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.rows.insert(label.into(), values);
        self
    }

    pub fn with_periods(mut self, periods: Vec<NaiveDate>) -> Self {
        self.periods = periods;
        self
    }

    pub fn row(&self, label: &str) -> Option<&[Option<f64>]> {
        self.rows.get(label).map(Vec::as_slice)
    }

    pub fn latest_period(&self) -> Option<NaiveDate> {
        self.periods.first().copied()
    }

    /// True when no row holds a single value.
    pub fn is_empty(&self) -> bool {
        self.rows.values().all(|values| values.iter().all(Option::is_none))
    }
}

/// Identifies the listed instrument and how its statements should be read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub ticker: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub is_domestic_listing: bool,
    #[serde(default)]
    pub reporting_period_mode: ReportingPeriodMode,
}

/// Market quote fields that do not come from the statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub price_to_book: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// Everything the engine needs for one analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub instrument: Instrument,
    pub income_statement: StatementSnapshot,
    pub balance_sheet: StatementSnapshot,
    #[serde(default)]
    pub market: MarketData,
}

impl FinancialSnapshot {
    /// True when neither statement has data. Callers should stop here instead of scoring.
    pub fn is_empty(&self) -> bool {
        self.income_statement.is_empty() && self.balance_sheet.is_empty()
    }
}

/// Scored rule identifiers, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    RevenueGrowth,
    EbitdaGrowth,
    NetIncomePositive,
    ReturnOnEquity,
    CurrentRatio,
    Leverage,
    PriceToBook,
}

impl RuleId {
    pub const ALL: [RuleId; 7] = [
        RuleId::RevenueGrowth,
        RuleId::EbitdaGrowth,
        RuleId::NetIncomePositive,
        RuleId::ReturnOnEquity,
        RuleId::CurrentRatio,
        RuleId::Leverage,
        RuleId::PriceToBook,
    ];

    pub fn category(&self) -> Category {
        match self {
            RuleId::RevenueGrowth | RuleId::EbitdaGrowth => Category::Growth,
            RuleId::NetIncomePositive | RuleId::ReturnOnEquity => Category::Profitability,
            RuleId::CurrentRatio => Category::Health,
            RuleId::Leverage => Category::Risk,
            RuleId::PriceToBook => Category::Valuation,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            RuleId::RevenueGrowth => "revenue_growth",
            RuleId::EbitdaGrowth => "ebitda_growth",
            RuleId::NetIncomePositive => "net_income_positive",
            RuleId::ReturnOnEquity => "return_on_equity",
            RuleId::CurrentRatio => "current_ratio",
            RuleId::Leverage => "leverage",
            RuleId::PriceToBook => "price_to_book",
        };
        f.write_str(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Growth,
    Profitability,
    Health,
    Risk,
    Valuation,
}

impl Category {
    pub fn to_label(&self) -> &'static str {
        match self {
            Category::Growth => "GROWTH",
            Category::Profitability => "PROFITABILITY",
            Category::Health => "HEALTH",
            Category::Risk => "RISK",
            Category::Valuation => "VALUATION",
        }
    }
}

/// Comparison direction of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    /// Strict comparison: equal to the threshold never passes.
    pub fn passes(&self, value: f64, threshold: f64) -> bool {
        match self {
            Direction::HigherIsBetter => value > threshold,
            Direction::LowerIsBetter => value < threshold,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Direction::HigherIsBetter => ">",
            Direction::LowerIsBetter => "<",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
    Cheap,
    Expensive,
}

impl Verdict {
    /// Whether the verdict counts toward the score.
    pub fn is_favorable(&self) -> bool {
        matches!(self, Verdict::Pass | Verdict::Cheap)
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Cheap => "CHEAP",
            Verdict::Expensive => "EXPENSIVE",
        }
    }
}

/// One scored check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub rule: RuleId,
    pub name: String,
    pub category: Category,
    pub raw_value: f64,
    pub threshold: f64,
    pub direction: Direction,
    /// Formatted value for display
    pub value: String,
    /// Formatted target for display
    pub target: String,
    pub verdict: Verdict,
}

/// Solvency band of the composite risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Distress,
    GreyZone,
    Safe,
}

impl RiskBand {
    pub fn to_label(&self) -> &'static str {
        match self {
            RiskBand::Distress => "distress",
            RiskBand::GreyZone => "grey zone",
            RiskBand::Safe => "safe",
        }
    }
}

/// Ratios derived from the resolved figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    pub current_ratio: f64,
    pub working_capital: f64,
    pub leverage: f64,
    pub revenue_growth: f64,
    pub ebitda_growth: f64,
    pub roe: f64,
    pub price_to_book: f64,
    pub fair_price_to_book: f64,
}

/// Scorecard produced by one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub ticker: String,
    pub mode: ReportingPeriodMode,
    pub currency: String,
    pub criteria: Vec<Criterion>,
    pub score: usize,
    pub total: usize,
    pub risk_score: f64,
    pub risk_band: RiskBand,
    pub ratios: FinancialRatios,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_mode_parsing() {
        assert_eq!("annual".parse::<ReportingPeriodMode>().unwrap(), ReportingPeriodMode::Annual);
        assert_eq!(
            " Quarterly ".parse::<ReportingPeriodMode>().unwrap(),
            ReportingPeriodMode::Quarterly
        );
        assert!("monthly".parse::<ReportingPeriodMode>().is_err());
    }

    #[test]
    fn test_snapshot_with_only_nulls_is_empty() {
        let statement = StatementSnapshot::new().with_row("Total Revenue", vec![None, None]);
        assert!(statement.is_empty());

        let snapshot = FinancialSnapshot {
            balance_sheet: StatementSnapshot::new().with_row("Total Assets", vec![Some(0.0)]),
            ..Default::default()
        };
        // A reported zero is data
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_direction_is_strict() {
        assert!(!Direction::HigherIsBetter.passes(0.0, 0.0));
        assert!(!Direction::LowerIsBetter.passes(0.7, 0.7));
        assert!(Direction::LowerIsBetter.passes(0.0, 0.7));
    }

    #[test]
    fn test_rule_order_matches_categories() {
        let categories: Vec<Category> = RuleId::ALL.iter().map(|r| r.category()).collect();
        assert_eq!(
            categories,
            vec![
                Category::Growth,
                Category::Growth,
                Category::Profitability,
                Category::Profitability,
                Category::Health,
                Category::Risk,
                Category::Valuation,
            ]
        );
    }

    #[test]
    fn test_snapshot_deserializes_without_periods() {
        let json = r#"{"rows": {"Total Assets": [1000.0, null]}}"#;
        let statement: StatementSnapshot = serde_json::from_str(json).unwrap();
        assert!(statement.periods.is_empty());
        assert_eq!(statement.row("Total Assets"), Some(&[Some(1000.0), None][..]));
    }
}
