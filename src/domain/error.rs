use thiserror::Error;

/// Domain-level errors representing violations of the forecast model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Hour out of range: {0}")]
    HourOutOfRange(i64),

    #[error("No forecast days left for city: {0}")]
    NoForecastDays(String),

    #[error("Day statistics not calculated for city: {0}")]
    NotCalculated(String),

    #[error("City aggregates not calculated: {0}")]
    NotAggregated(String),
}
