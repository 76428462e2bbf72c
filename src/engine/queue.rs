use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use super::error::EngineError;
use crate::domain::CityForecast;

/// How the queue consumer decides that no more cities will arrive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueueTermination {
    /// End of input once every sender has been dropped
    #[default]
    OnClose,
    /// Also end input after this long without a message.
    ///
    /// A producer slower than the timeout makes the run fail with
    /// `EngineError::AmbiguousTermination`.
    Timeout(Duration),
}

impl QueueTermination {
    /// The silence window used by the timeout heuristic when none is given
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
}

/// Create the hand-off queue between retrieval and calculation
pub fn handoff_queue(termination: QueueTermination) -> (QueueSender, QueueReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        QueueSender { inner: tx },
        QueueReceiver {
            inner: rx,
            termination,
        },
    )
}

/// Producer half of the hand-off queue; cloned per producer
#[derive(Debug, Clone)]
pub struct QueueSender {
    inner: mpsc::UnboundedSender<CityForecast>,
}

impl QueueSender {
    /// Enqueue a retrieved city. Never blocks and never drops while the
    /// consumer is alive.
    pub fn send(&self, city: CityForecast) -> Result<(), EngineError> {
        self.inner
            .send(city)
            .map_err(|e| EngineError::AmbiguousTermination(e.0.name().to_string()))
    }
}

/// Consumer half of the hand-off queue
#[derive(Debug)]
pub struct QueueReceiver {
    inner: mpsc::UnboundedReceiver<CityForecast>,
    termination: QueueTermination,
}

impl QueueReceiver {
    /// Next city in arrival order, or `None` at end of input
    pub async fn recv(&mut self) -> Option<CityForecast> {
        match self.termination {
            QueueTermination::OnClose => self.inner.recv().await,
            QueueTermination::Timeout(limit) => {
                match tokio::time::timeout(limit, self.inner.recv()).await {
                    Ok(message) => message,
                    Err(_) => {
                        warn!(?limit, "No city arrived in time, assuming retrieval finished");
                        self.inner.close();
                        // a send can land between the timeout and close;
                        // the closed channel still yields it, then None
                        self.inner.recv().await
                    }
                }
            }
        }
    }
}
