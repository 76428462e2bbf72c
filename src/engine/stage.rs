use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span, debug};

use super::error::EngineError;

/// Message on an inter-stage channel: a data item or the end-of-stream marker
#[derive(Debug, Clone, PartialEq)]
pub enum StageMessage<T> {
    Item(T),
    EndOfStream,
}

/// A pipeline stage that runs as its own task and owns all of its state.
///
/// Stages talk to each other only through the channels they were built with.
pub trait Stage: Sized + Send + 'static {
    type Output: Send + 'static;

    /// Stage name used in logs and errors
    const NAME: &'static str;

    /// Drive the stage to completion
    fn run(self) -> impl Future<Output = Result<Self::Output, EngineError>> + Send;

    /// Spawn the stage as an independent task inside `span`.
    ///
    /// The task stops with `EngineError::Cancelled` once `cancel` fires.
    fn spawn(self, span: Span, cancel: CancellationToken) -> JoinHandle<Result<Self::Output, EngineError>> {
        tokio::spawn(
            async move {
                debug!("Stage started");
                let result = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(EngineError::Cancelled(Self::NAME)),
                    result = self.run() => result,
                };
                debug!(ok = result.is_ok(), "Stage finished");
                result
            }
            .instrument(span),
        )
    }
}
