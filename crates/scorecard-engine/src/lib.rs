pub mod config;
pub mod ratios;
pub mod report;
pub mod resolver;
pub mod risk;
pub mod rules;


pub use config::{MissingDataPolicy, ModeValue, RiskModel, ScoringConfig};
pub use resolver::{lookup, resolve, ResolvedFinancials};

use resolver::resolve_financials;
use risk::RiskComponents;
use scorecard_core::{AnalysisError, FinancialSnapshot, Report};

/// Turns a financial snapshot into a scorecard report.
///
/// The engine holds only its configuration; `analyze` is a pure function of
/// the snapshot and may be called any number of times.
#[derive(Debug, Clone, Default)]
pub struct ScorecardEngine {
    config: ScoringConfig,
}

impl ScorecardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn analyze(&self, snapshot: &FinancialSnapshot) -> Result<Report, AnalysisError> {
        let instrument = &snapshot.instrument;
        let mode = instrument.reporting_period_mode;

        self.check_period_alignment(snapshot)?;

        let resolution = resolve_financials(snapshot, self.config.prior_period_offset);
        if !resolution.missing.is_empty() {
            match self.config.missing_data {
                MissingDataPolicy::Strict => {
                    return Err(AnalysisError::MissingData(
                        resolution.missing.iter().map(|s| s.to_string()).collect(),
                    ));
                }
                MissingDataPolicy::Lenient => {
                    tracing::debug!(
                        ticker = %instrument.ticker,
                        missing = ?resolution.missing,
                        "unresolved line items treated as zero"
                    );
                }
            }
        }
        let financials = resolution.financials;

        let ratios = ratios::compute(&financials, mode, &self.config);
        let currency = rules::display_currency(instrument, &self.config);

        let criteria = rules::rule_set(&ratios, &financials, mode, &self.config)
            .iter()
            .map(|rule| rule.evaluate(&currency))
            .collect();

        let components = RiskComponents::from_financials(
            &financials,
            ratios.working_capital,
            self.config.ebitda_scale.for_mode(mode),
        );
        let risk_score = components.score(&self.config.risk);
        let risk_band = risk::classify(risk_score, &self.config.risk);

        let report =
            report::assemble(instrument, currency, criteria, ratios, risk_score, risk_band);
        tracing::debug!(
            ticker = %report.ticker,
            score = report.score,
            total = report.total,
            risk_score = report.risk_score,
            "scorecard assembled"
        );
        Ok(report)
    }

    /// Compare the latest period of both statements when both carry dates.
    fn check_period_alignment(&self, snapshot: &FinancialSnapshot) -> Result<(), AnalysisError> {
        let (Some(income), Some(balance)) = (
            snapshot.income_statement.latest_period(),
            snapshot.balance_sheet.latest_period(),
        ) else {
            return Ok(());
        };
        if income == balance {
            return Ok(());
        }

        match self.config.missing_data {
            MissingDataPolicy::Strict => Err(AnalysisError::PeriodMismatch { income, balance }),
            MissingDataPolicy::Lenient => {
                tracing::warn!(
                    ticker = %snapshot.instrument.ticker,
                    %income,
                    %balance,
                    "statement periods are not aligned"
                );
                Ok(())
            }
        }
    }
}
