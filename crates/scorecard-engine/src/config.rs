//! Scoring configuration.
//!
//! Every threshold and factor the engine uses lives here, keyed by rule and
//! reporting period mode. `ScoringConfig::default()` reproduces the standard
//! scorecard; a JSON file can override any subset of fields.

use scorecard_core::{AnalysisError, ReportingPeriodMode, RuleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// How unresolved line items are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataPolicy {
    /// Absent items resolve to 0.0 and the analysis proceeds.
    #[default]
    Lenient,
    /// Any absent item fails the analysis with `AnalysisError::MissingData`.
    Strict,
}

impl FromStr for MissingDataPolicy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" | "zero" => Ok(MissingDataPolicy::Lenient),
            "strict" => Ok(MissingDataPolicy::Strict),
            other => Err(AnalysisError::ConfigError(format!(
                "unknown missing data policy '{}'",
                other
            ))),
        }
    }
}

/// A value that may differ between annual and quarterly mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeValue {
    pub annual: f64,
    pub quarterly: f64,
}

impl ModeValue {
    pub const fn new(annual: f64, quarterly: f64) -> Self {
        Self { annual, quarterly }
    }

    pub const fn flat(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn for_mode(&self, mode: ReportingPeriodMode) -> f64 {
        match mode {
            ReportingPeriodMode::Annual => self.annual,
            ReportingPeriodMode::Quarterly => self.quarterly,
        }
    }
}

/// Weights and band cut-offs of the composite risk score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskModel {
    pub working_capital_weight: f64,
    pub retained_earnings_weight: f64,
    pub ebitda_weight: f64,
    pub equity_weight: f64,
    /// Scores strictly below this are distress
    pub distress_below: f64,
    /// Scores strictly above this are safe
    pub safe_above: f64,
}

impl Default for RiskModel {
    fn default() -> Self {
        Self {
            working_capital_weight: 6.56,
            retained_earnings_weight: 3.26,
            ebitda_weight: 6.72,
            equity_weight: 1.05,
            distress_below: 1.10,
            safe_above: 2.60,
        }
    }
}

/// Default rule thresholds. The valuation rule compares against the computed
/// fair price-to-book, so its entry here is unused.
pub fn default_threshold(rule: RuleId) -> ModeValue {
    match rule {
        RuleId::RevenueGrowth => ModeValue::flat(0.40),
        RuleId::EbitdaGrowth => ModeValue::flat(0.30),
        RuleId::NetIncomePositive => ModeValue::flat(0.0),
        RuleId::ReturnOnEquity => ModeValue::new(0.20, 0.30),
        RuleId::CurrentRatio => ModeValue::flat(1.20),
        RuleId::Leverage => ModeValue::new(0.70, 0.75),
        RuleId::PriceToBook => ModeValue::flat(0.0),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Threshold table keyed by rule. Rules missing from the table use `default_threshold`.
    pub thresholds: BTreeMap<RuleId, ModeValue>,
    /// Fair price-to-book = ROE * this multiplier
    pub fair_price_to_book_multiplier: f64,
    /// EBITDA multiplier in the risk score (trailing figure vs single quarter)
    pub ebitda_scale: ModeValue,
    /// ROE multiplier (single quarter annualized to a year)
    pub roe_annualization: ModeValue,
    /// Which period counts as "prior" for growth rules
    pub prior_period_offset: usize,
    pub missing_data: MissingDataPolicy,
    /// Currency shown when the instrument reports none
    pub default_currency: String,
    /// Currency shown for domestic listings
    pub domestic_currency: String,
    pub risk: RiskModel,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            thresholds: RuleId::ALL
                .iter()
                .filter(|rule| **rule != RuleId::PriceToBook)
                .map(|rule| (*rule, default_threshold(*rule)))
                .collect(),
            fair_price_to_book_multiplier: 10.0,
            ebitda_scale: ModeValue::new(0.8, 4.0),
            roe_annualization: ModeValue::new(1.0, 4.0),
            prior_period_offset: 1,
            missing_data: MissingDataPolicy::Lenient,
            default_currency: "USD".to_string(),
            domestic_currency: "TRY".to_string(),
            risk: RiskModel::default(),
        }
    }
}

impl ScoringConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let config: ScoringConfig = serde_json::from_str(json)
            .map_err(|e| AnalysisError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_missing_data(mut self, policy: MissingDataPolicy) -> Self {
        self.missing_data = policy;
        self
    }

    pub fn threshold(&self, rule: RuleId, mode: ReportingPeriodMode) -> f64 {
        self.thresholds
            .get(&rule)
            .copied()
            .unwrap_or_else(|| default_threshold(rule))
            .for_mode(mode)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.prior_period_offset == 0 {
            return Err(AnalysisError::ConfigError(
                "prior_period_offset must be at least 1".to_string(),
            ));
        }
        if !self.fair_price_to_book_multiplier.is_finite() {
            return Err(AnalysisError::ConfigError(
                "fair_price_to_book_multiplier must be finite".to_string(),
            ));
        }
        if self.risk.distress_below > self.risk.safe_above {
            return Err(AnalysisError::ConfigError(format!(
                "risk band cut-offs overlap: distress_below {} > safe_above {}",
                self.risk.distress_below, self.risk.safe_above
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_by_mode() {
        let config = ScoringConfig::default();
        assert_eq!(config.threshold(RuleId::ReturnOnEquity, ReportingPeriodMode::Annual), 0.20);
        assert_eq!(config.threshold(RuleId::ReturnOnEquity, ReportingPeriodMode::Quarterly), 0.30);
        assert_eq!(config.threshold(RuleId::Leverage, ReportingPeriodMode::Annual), 0.70);
        assert_eq!(config.threshold(RuleId::Leverage, ReportingPeriodMode::Quarterly), 0.75);
        assert_eq!(config.threshold(RuleId::CurrentRatio, ReportingPeriodMode::Quarterly), 1.20);
        assert_eq!(config.ebitda_scale.for_mode(ReportingPeriodMode::Annual), 0.8);
        assert_eq!(config.ebitda_scale.for_mode(ReportingPeriodMode::Quarterly), 4.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ScoringConfig::from_json(
            r#"{
                "thresholds": { "revenue_growth": { "annual": 0.10, "quarterly": 0.05 } },
                "missing_data": "strict"
            }"#,
        )
        .unwrap();

        assert_eq!(config.threshold(RuleId::RevenueGrowth, ReportingPeriodMode::Annual), 0.10);
        // Rules left out of the table fall back to the defaults
        assert_eq!(config.threshold(RuleId::Leverage, ReportingPeriodMode::Annual), 0.70);
        assert_eq!(config.missing_data, MissingDataPolicy::Strict);
        assert_eq!(config.fair_price_to_book_multiplier, 10.0);
        assert_eq!(config.risk, RiskModel::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(ScoringConfig::from_json(r#"{"prior_period_offset": 0}"#).is_err());
        assert!(ScoringConfig::from_json(
            r#"{"risk": {"distress_below": 3.0, "safe_above": 2.0}}"#
        )
        .is_err());
        assert!(ScoringConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("STRICT".parse::<MissingDataPolicy>().unwrap(), MissingDataPolicy::Strict);
        assert_eq!("lenient".parse::<MissingDataPolicy>().unwrap(), MissingDataPolicy::Lenient);
        assert!("maybe".parse::<MissingDataPolicy>().is_err());
    }
}
