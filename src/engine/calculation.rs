use tokio::sync::mpsc;
use tracing::{debug, info};

use super::error::EngineError;
use super::queue::QueueReceiver;
use super::stage::{Stage, StageMessage};
use crate::domain::CityForecast;

/// Computes day statistics for each retrieved city and forwards it at once
pub struct CalculationStage {
    input: QueueReceiver,
    output: mpsc::UnboundedSender<StageMessage<CityForecast>>,
}

impl CalculationStage {
    pub fn new(
        input: QueueReceiver,
        output: mpsc::UnboundedSender<StageMessage<CityForecast>>,
    ) -> Self {
        Self { input, output }
    }

    fn forward(&self, message: StageMessage<CityForecast>) -> Result<(), EngineError> {
        self.output
            .send(message)
            .map_err(|_| EngineError::DownstreamClosed(Self::NAME))
    }
}

impl Stage for CalculationStage {
    /// Number of cities forwarded
    type Output = usize;

    const NAME: &'static str = "calculation";

    async fn run(mut self) -> Result<usize, EngineError> {
        let mut forwarded = 0;

        while let Some(mut city) = self.input.recv().await {
            let before = city.forecasts().len();
            city.calculate_days();
            debug!(
                city = city.name(),
                days = city.forecasts().len(),
                dropped = before - city.forecasts().len(),
                "Day statistics calculated"
            );

            self.forward(StageMessage::Item(city))?;
            forwarded += 1;
        }

        self.forward(StageMessage::EndOfStream)?;
        info!(cities = forwarded, "Calculation finished");
        Ok(forwarded)
    }
}
