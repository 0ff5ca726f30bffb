//! scorecard: score a company's latest financial statements.
//!
//! Resolves the ticker (Borsa Istanbul listing first, then the bare symbol),
//! fetches the income statement and balance sheet, and prints a pass/fail
//! scorecard with the composite risk score.
//!
//! Usage:
//!   cargo run -p scorecard-cli -- GZNMI
//!   cargo run -p scorecard-cli -- AAPL --period quarterly --json
//!   cargo run -p scorecard-cli -- --input snapshot.json --missing-data strict
//!   cargo run -p scorecard-cli -- AAPL --config scoring.json

mod render;

use anyhow::{bail, Context};
use clap::Parser;
use scorecard_core::{FinancialSnapshot, ReportingPeriodMode, StatementSource};
use scorecard_engine::{MissingDataPolicy, ScorecardEngine, ScoringConfig};
use statement_client::YahooFinanceClient;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "scorecard",
    version,
    about = "Growth, profitability and solvency scorecard for a listed company"
)]
struct Args {
    /// Ticker symbol, e.g. GZNMI or AAPL
    #[arg(required_unless_present = "input")]
    ticker: Option<String>,

    /// Statement period: annual or quarterly
    #[arg(long, env = "SCORECARD_PERIOD")]
    period: Option<ReportingPeriodMode>,

    /// Missing line items: lenient (zero) or strict (fail)
    #[arg(long, env = "SCORECARD_MISSING_DATA")]
    missing_data: Option<MissingDataPolicy>,

    /// JSON scoring config overriding thresholds and factors
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Score a saved snapshot JSON file instead of fetching
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(
    path: Option<&Path>,
    missing_data: Option<MissingDataPolicy>,
) -> anyhow::Result<ScoringConfig> {
    let config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ScoringConfig::from_json(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ScoringConfig::default(),
    };
    Ok(match missing_data {
        Some(policy) => config.with_missing_data(policy),
        None => config,
    })
}

fn load_snapshot(path: &Path) -> anyhow::Result<FinancialSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "scorecard=info,scorecard_engine=warn,statement_client=info".into()
                }),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref(), args.missing_data)?;

    let snapshot = match &args.input {
        Some(path) => {
            let mut snapshot = load_snapshot(path)?;
            if let Some(mode) = args.period {
                snapshot.instrument.reporting_period_mode = mode;
            }
            if snapshot.instrument.ticker.is_empty() {
                snapshot.instrument.ticker = args.ticker.clone().unwrap_or_default();
            }
            tracing::info!(
                "Loaded snapshot for {} from {}",
                snapshot.instrument.ticker,
                path.display()
            );
            snapshot
        }
        None => {
            let ticker = args.ticker.as_deref().context("ticker is required")?;
            let mode = args.period.unwrap_or_default();
            tracing::info!("Fetching {} statements for {}...", mode, ticker);
            YahooFinanceClient::new()
                .fetch(ticker, mode)
                .await
                .with_context(|| format!("fetching statements for {}", ticker))?
        }
    };

    if snapshot.is_empty() {
        bail!("no financial data found for {}", snapshot.instrument.ticker);
    }

    let report = ScorecardEngine::with_config(config).analyze(&snapshot)?;
    tracing::info!(
        "{}: score {}/{}, risk score {:.2} ({})",
        report.ticker,
        report.score,
        report.total,
        report.risk_score,
        report.risk_band.to_label()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_report(&report));
    }

    Ok(())
}
