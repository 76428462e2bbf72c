use thiserror::Error;
use tokio::task::JoinError;

use crate::domain::DomainError;
use crate::io::IoError;

/// Errors raised by the pipeline stages and their orchestration
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Input of {0} stage closed before end-of-stream")]
    UpstreamClosed(&'static str),

    #[error("Output of {0} stage closed by its consumer")]
    DownstreamClosed(&'static str),

    #[error("Queue consumer finished before {0} was delivered")]
    AmbiguousTermination(String),

    #[error("Ranking is empty")]
    EmptyRanking,

    #[error("Stage {0} cancelled")]
    Cancelled(&'static str),

    #[error("Stage task failed: {0}")]
    Task(#[from] JoinError),

    #[error("Source error: {0}")]
    Source(#[from] IoError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
