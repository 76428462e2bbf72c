use std::sync::Arc;

use futures::{StreamExt, stream};
use tracing::{debug, info};

use super::error::ErrorPolicy;
use crate::domain::CityForecast;
use crate::engine::{EngineError, QueueSender};
use crate::io::{IoError, WeatherSource};

/// Concurrency suited to I/O-bound fetches: `min(32, cores + 4)`
pub fn default_workers() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cores + 4).min(32)
}

/// Counts from one fan-out pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutSummary {
    pub enqueued: usize,
    pub skipped: usize,
}

/// Fetches every city concurrently and enqueues each one as it completes
pub struct RetrievalFanOut<S: ?Sized, P> {
    source: Arc<S>,
    error_policy: P,
    workers: usize,
}

impl<S, P> RetrievalFanOut<S, P>
where
    S: WeatherSource + ?Sized,
    P: ErrorPolicy,
{
    pub fn new(source: Arc<S>, error_policy: P) -> Self {
        Self {
            source,
            error_policy,
            workers: default_workers(),
        }
    }

    /// Set the maximum number of fetches in flight (at least 1)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Fetch all `cities`, pushing each result onto `queue` in completion
    /// order.
    ///
    /// Returns once every fetch has finished. The queue is not closed here;
    /// the caller drops its sender when it is ready to signal end of input.
    /// On an aborting error the remaining in-flight fetches are dropped.
    pub async fn run(&self, cities: &[String], queue: &QueueSender) -> Result<FanOutSummary, EngineError> {
        info!(cities = cities.len(), workers = self.workers, "Retrieval started");

        let source = self.source.as_ref();
        let mut fetches = stream::iter(cities)
            .map(|city| async move { (city, fetch_city(source, city).await) })
            .buffer_unordered(self.workers);

        let mut summary = FanOutSummary::default();
        while let Some((city, result)) = fetches.next().await {
            match result {
                Ok(forecast) => {
                    debug!(city = city.as_str(), days = forecast.forecasts().len(), "City retrieved");
                    queue.send(forecast)?;
                    summary.enqueued += 1;
                }
                Err(e) => {
                    if !self.error_policy.handle_source_error(city, &e) {
                        return Err(EngineError::Source(e));
                    }
                    summary.skipped += 1;
                }
            }
        }

        info!(enqueued = summary.enqueued, skipped = summary.skipped, "Retrieval finished");
        Ok(summary)
    }
}

/// Fetch and parse one city; an empty provider list is `NoData`
async fn fetch_city<S>(source: &S, city: &str) -> Result<CityForecast, IoError>
where
    S: WeatherSource + ?Sized,
{
    let days = source
        .fetch(city)
        .await?
        .into_days(city)?
        .ok_or_else(|| IoError::NoData(city.to_string()))?;

    Ok(CityForecast::new(city, days))
}
