use thiserror::Error;

use crate::engine::EngineError;
use crate::io::IoError;

/// Top-level application errors unifying all layer errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Source error: {0}")]
    Source(#[from] IoError),

    #[error("Pipeline error: {0}")]
    Engine(#[from] EngineError),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}
