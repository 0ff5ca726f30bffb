use async_trait::async_trait;
use crate::{AnalysisError, FinancialSnapshot, ReportingPeriodMode};

/// Trait for collaborators that acquire statement snapshots.
///
/// Implementations resolve the ticker, fetch both statements and the quote
/// metadata, and return an empty snapshot when the symbol exists but has no
/// filings. Symbol lookup failures are `AnalysisError::SymbolNotFound`.
#[async_trait]
pub trait StatementSource: Send + Sync {
    async fn fetch(
        &self,
        ticker: &str,
        mode: ReportingPeriodMode,
    ) -> Result<FinancialSnapshot, AnalysisError>;
}
