use scorecard_core::Report;

const HEADERS: [&str; 4] = ["CRITERION", "VALUE", "TARGET", "VERDICT"];

/// Plain-text scorecard: summary lines followed by the criteria table.
pub fn render_report(report: &Report) -> String {
    let rows: Vec<[String; 4]> = report
        .criteria
        .iter()
        .map(|c| {
            [
                c.name.clone(),
                c.value.clone(),
                c.target.clone(),
                c.verdict.to_label().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 4]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}, {})\n",
        report.ticker,
        report.mode.to_label(),
        report.currency
    ));
    out.push_str(&format!("Score: {} / {}\n", report.score, report.total));
    out.push_str(&format!(
        "Risk score: {:.2} ({})\n\n",
        report.risk_score,
        report.risk_band.to_label()
    ));

    out.push_str(&format_row(HEADERS));
    out.push('\n');
    let rule_width = widths.iter().sum::<usize>() + 3 * (HEADERS.len() - 1);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');
    for row in &rows {
        let cells = [row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()];
        out.push_str(&format_row(cells));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecard_core::{
        Category, Criterion, Direction, FinancialRatios, ReportingPeriodMode, RiskBand, RuleId,
        Verdict,
    };

    #[test]
    fn test_render_report() {
        let report = Report {
            ticker: "ACME".to_string(),
            mode: ReportingPeriodMode::Annual,
            currency: "USD".to_string(),
            criteria: vec![Criterion {
                rule: RuleId::CurrentRatio,
                name: "Current Ratio".to_string(),
                category: Category::Health,
                raw_value: 1.5,
                threshold: 1.2,
                direction: Direction::HigherIsBetter,
                value: "1.50".to_string(),
                target: "> 1.20".to_string(),
                verdict: Verdict::Pass,
            }],
            score: 1,
            total: 1,
            risk_score: 2.7572,
            risk_band: RiskBand::Safe,
            ratios: FinancialRatios::default(),
        };

        let text = render_report(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ACME (Annual, USD)");
        assert_eq!(lines[1], "Score: 1 / 1");
        assert_eq!(lines[2], "Risk score: 2.76 (safe)");
        assert_eq!(lines[4], "CRITERION     | VALUE | TARGET | VERDICT");
        assert_eq!(lines[6], "Current Ratio | 1.50  | > 1.20 | PASS");
    }
}
