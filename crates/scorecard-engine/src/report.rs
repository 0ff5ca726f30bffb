use scorecard_core::{Criterion, FinancialRatios, Instrument, Report, RiskBand};

/// Build the report. The tally is folded from the criteria, never kept as a
/// running counter.
pub fn assemble(
    instrument: &Instrument,
    currency: String,
    criteria: Vec<Criterion>,
    ratios: FinancialRatios,
    risk_score: f64,
    risk_band: RiskBand,
) -> Report {
    let (score, total) = criteria.iter().fold((0usize, 0usize), |(passed, total), c| {
        (passed + usize::from(c.verdict.is_favorable()), total + 1)
    });

    Report {
        ticker: instrument.ticker.clone(),
        mode: instrument.reporting_period_mode,
        currency,
        criteria,
        score,
        total,
        risk_score,
        risk_band,
        ratios,
    }
}
