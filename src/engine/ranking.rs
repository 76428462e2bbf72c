use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use super::error::EngineError;
use super::stage::{Stage, StageMessage};
use crate::domain::{CityForecast, RankedCityList, TieBreak};

/// Collects every calculated city, then emits the ranked batch once
pub struct RankingStage {
    input: mpsc::UnboundedReceiver<StageMessage<CityForecast>>,
    output: oneshot::Sender<RankedCityList>,
    tie_break: TieBreak,
}

impl RankingStage {
    pub fn new(
        input: mpsc::UnboundedReceiver<StageMessage<CityForecast>>,
        output: oneshot::Sender<RankedCityList>,
    ) -> Self {
        Self {
            input,
            output,
            tie_break: TieBreak::default(),
        }
    }

    /// Set how fully tied cities are ordered (defaults to arrival order)
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

impl Stage for RankingStage {
    /// Number of cities ranked
    type Output = usize;

    const NAME: &'static str = "ranking";

    async fn run(mut self) -> Result<usize, EngineError> {
        let mut cities = Vec::new();

        loop {
            match self.input.recv().await {
                Some(StageMessage::Item(city)) => {
                    debug!(city = city.name(), "City received for ranking");
                    cities.push(city);
                }
                Some(StageMessage::EndOfStream) => break,
                None => return Err(EngineError::UpstreamClosed(Self::NAME)),
            }
        }

        for city in &mut cities {
            city.aggregate()?;
        }

        let ranked = RankedCityList::rank(cities, self.tie_break)?;
        let count = ranked.len();
        if let Some(best) = ranked.best() {
            info!(cities = count, best = best.city.name(), "Ranking complete");
        }

        self.output
            .send(ranked)
            .map_err(|_| EngineError::DownstreamClosed(Self::NAME))?;
        Ok(count)
    }
}
