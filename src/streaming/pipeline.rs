use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncWrite;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info, info_span, warn};

use super::error::ErrorPolicy;
use super::fan_out::RetrievalFanOut;
use crate::domain::TieBreak;
use crate::engine::{
    CalculationStage, EngineError, QueueTermination, RankingStage, Report, ReportingStage, Stage,
    handoff_queue,
};
use crate::io::{CityRegistry, WeatherSource};

/// Wires retrieval, calculation, ranking and reporting into one batch run
pub struct Pipeline<S: ?Sized, P> {
    registry: Arc<CityRegistry>,
    cities: Vec<String>,
    fan_out: RetrievalFanOut<S, P>,
    termination: QueueTermination,
    tie_break: TieBreak,
    report_path: Option<PathBuf>,
}

impl<S, P> Pipeline<S, P>
where
    S: WeatherSource + ?Sized,
    P: ErrorPolicy,
{
    /// Create a pipeline over every city in `registry`
    pub fn new(source: Arc<S>, registry: Arc<CityRegistry>, error_policy: P) -> Self {
        let cities = registry.keys();
        Self {
            registry,
            cities,
            fan_out: RetrievalFanOut::new(source, error_policy),
            termination: QueueTermination::default(),
            tie_break: TieBreak::default(),
            report_path: None,
        }
    }

    /// Restrict the run to these city keys
    pub fn with_cities(mut self, cities: Vec<String>) -> Self {
        self.cities = cities;
        self
    }

    /// Set fan-out concurrency (defaults to `default_workers()`)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.fan_out = self.fan_out.with_workers(workers);
        self
    }

    /// Set how the calculation stage detects end of input (defaults to OnClose)
    pub fn with_termination(mut self, termination: QueueTermination) -> Self {
        self.termination = termination;
        self
    }

    /// Set how fully tied cities are ordered (defaults to arrival order)
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Write the JSON report to `path` (no report by default)
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// Run the batch to completion, printing to `console`.
    ///
    /// 1. Spawns the calculation, ranking and reporting stages
    /// 2. Runs the fan-out on this task, filling the hand-off queue
    /// 3. Closes the queue and awaits the three stages
    ///
    /// A retrieval failure cancels every stage before the queue is closed
    /// and withholds the reporting release, so no report is produced even
    /// when a queue timeout already let ranking finish.
    pub async fn run<W>(self, console: W) -> Result<Report, EngineError>
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let span = info_span!("pipeline", cities = self.cities.len());
        self.run_in_span(console).instrument(span).await
    }

    async fn run_in_span<W>(self, console: W) -> Result<Report, EngineError>
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let Pipeline {
            registry,
            cities,
            fan_out,
            termination,
            tie_break,
            report_path,
        } = self;
        info!(?termination, ?tie_break, "Pipeline starting");

        let (queue_tx, queue_rx) = handoff_queue(termination);
        let (calc_tx, calc_rx) = mpsc::unbounded_channel();
        let (rank_tx, rank_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let cancel = CancellationToken::new();

        let calculation = CalculationStage::new(queue_rx, calc_tx)
            .spawn(info_span!("stage", name = CalculationStage::NAME), cancel.clone());
        let ranking = RankingStage::new(calc_rx, rank_tx)
            .with_tie_break(tie_break)
            .spawn(info_span!("stage", name = RankingStage::NAME), cancel.clone());
        let reporting = ReportingStage::new(rank_rx, registry, console)
            .with_report_path(report_path)
            .with_release(release_rx)
            .spawn(
                info_span!("stage", name = ReportingStage::<W>::NAME),
                cancel.clone(),
            );

        if let Err(e) = fan_out.run(&cities, &queue_tx).await {
            warn!(error = %e, "Retrieval failed, cancelling stages");
            cancel.cancel();
            drop(release_tx);
            drop(queue_tx);
            // the stages can only end in Cancelled or its fallout now
            let _ = tokio::join!(calculation, ranking, reporting);
            return Err(e);
        }
        drop(queue_tx);
        // reporting may only emit once every city made it into the queue
        let _ = release_tx.send(());

        let (calculated, ranked, report) = tokio::join!(calculation, ranking, reporting);
        let calculated = calculated??;
        let ranked = ranked??;
        let report = report??;

        info!(calculated, ranked, best = %report.best_city, "Pipeline finished");
        Ok(report)
    }
}
