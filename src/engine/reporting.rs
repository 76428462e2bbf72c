use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::oneshot;
use tracing::info;

use super::error::EngineError;
use super::stage::Stage;
use crate::domain::RankedCityList;
use crate::io::{CityRegistry, IoError, render_table, write_report};

const ANNOUNCEMENT_PREFIX: &str = "Самый благоприятный город - ";

/// What the reporting stage produced for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Registry key of the top-ranked city
    pub best_city: String,
    pub announcement: String,
    pub table: String,
    pub ranking: RankedCityList,
}

/// Receives the ranked batch, prints it and persists the JSON report
pub struct ReportingStage<W> {
    input: oneshot::Receiver<RankedCityList>,
    registry: Arc<CityRegistry>,
    console: W,
    report_path: Option<PathBuf>,
    release: Option<oneshot::Receiver<()>>,
}

impl<W> ReportingStage<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(
        input: oneshot::Receiver<RankedCityList>,
        registry: Arc<CityRegistry>,
        console: W,
    ) -> Self {
        Self {
            input,
            registry,
            console,
            report_path: None,
            release: None,
        }
    }

    /// Persist the JSON report at `path` (not written by default)
    pub fn with_report_path(mut self, path: Option<PathBuf>) -> Self {
        self.report_path = path;
        self
    }

    /// Hold all output until `release` fires.
    ///
    /// A dropped release sender means retrieval failed; the stage then ends
    /// with `EngineError::Cancelled` and writes nothing.
    pub fn with_release(mut self, release: oneshot::Receiver<()>) -> Self {
        self.release = Some(release);
        self
    }
}

impl<W> Stage for ReportingStage<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    type Output = Report;

    const NAME: &'static str = "reporting";

    async fn run(mut self) -> Result<Report, EngineError> {
        let ranking = self
            .input
            .await
            .map_err(|_| EngineError::UpstreamClosed(Self::NAME))?;

        if let Some(release) = self.release.take() {
            release
                .await
                .map_err(|_| EngineError::Cancelled(Self::NAME))?;
        }

        let best_city = ranking
            .best()
            .ok_or(EngineError::EmptyRanking)?
            .city
            .name()
            .to_string();
        info!(best = %best_city, "Best city selected");

        let announcement = format!(
            "{ANNOUNCEMENT_PREFIX}{}",
            self.registry.display_name(&best_city)?
        );
        let table = render_table(&ranking, &self.registry)?;

        self.console
            .write_all(format!("{announcement}\n{table}\n").as_bytes())
            .await
            .map_err(IoError::from)?;
        self.console.flush().await.map_err(IoError::from)?;

        if let Some(path) = &self.report_path {
            write_report(&ranking, path).await?;
        }

        Ok(Report {
            best_city,
            announcement,
            table,
            ranking,
        })
    }
}
