use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Missing data: {}", .0.join(", "))]
    MissingData(Vec<String>),

    #[error("Period mismatch: income statement ends {income}, balance sheet ends {balance}")]
    PeriodMismatch { income: NaiveDate, balance: NaiveDate },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}
