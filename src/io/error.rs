use std::io;
use thiserror::Error;

/// IO-level errors for forecast retrieval, parsing and report output
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Weather source unavailable for {city}: {reason}")]
    SourceUnavailable { city: String, reason: String },

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Malformed response for {city}: {reason}")]
    MalformedResponse { city: String, reason: String },

    #[error("No forecast data for {0}")]
    NoData(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IoError {
    pub(crate) fn unavailable(city: &str, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            city: city.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn malformed(city: &str, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            city: city.to_string(),
            reason: reason.to_string(),
        }
    }
}
