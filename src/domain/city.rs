use super::day::DayForecast;
use super::error::DomainError;

/// All forecast days for one city plus its city-level aggregates
#[derive(Debug, Clone, PartialEq)]
pub struct CityForecast {
    name: String,
    forecasts: Vec<DayForecast>,
    avg_temp: Option<f64>,
    avg_clear_hours: Option<f64>,
}

impl CityForecast {
    /// Create a city record as retrieved, with no statistics computed
    pub fn new(name: impl Into<String>, forecasts: Vec<DayForecast>) -> Self {
        Self {
            name: name.into(),
            forecasts,
            avg_temp: None,
            avg_clear_hours: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn forecasts(&self) -> &[DayForecast] {
        &self.forecasts
    }

    /// Mean of the retained days' average temperatures, rounded to 0.1
    pub fn avg_temp(&self) -> Option<f64> {
        self.avg_temp
    }

    /// Mean of the retained days' clear-hour counts, rounded to 0.1
    pub fn avg_clear_hours(&self) -> Option<f64> {
        self.avg_clear_hours
    }

    /// Compute every day's statistics, then drop days without readings.
    ///
    /// Run once by the calculation stage.
    pub fn calculate_days(&mut self) {
        for day in &mut self.forecasts {
            day.calculate();
        }
        self.forecasts.retain(|day| !day.is_empty());
    }

    /// Compute the city-level aggregates from the day statistics.
    ///
    /// Run once by the ranking stage, after `calculate_days`.
    pub fn aggregate(&mut self) -> Result<(), DomainError> {
        if self.forecasts.is_empty() {
            return Err(DomainError::NoForecastDays(self.name.clone()));
        }

        let mut temps = Vec::with_capacity(self.forecasts.len());
        let mut clear = Vec::with_capacity(self.forecasts.len());
        for day in &self.forecasts {
            match (day.avg_temp(), day.clear_hour_count()) {
                (Some(t), Some(c)) => {
                    temps.push(f64::from(t));
                    clear.push(f64::from(c));
                }
                _ => return Err(DomainError::NotCalculated(self.name.clone())),
            }
        }

        self.avg_temp = Some(round_one_decimal(mean(&temps)));
        self.avg_clear_hours = Some(round_one_decimal(mean(&clear)));
        Ok(())
    }

    /// Both aggregates, or an error if `aggregate` has not run
    pub fn ranking_key(&self) -> Result<(f64, f64), DomainError> {
        match (self.avg_temp, self.avg_clear_hours) {
            (Some(t), Some(c)) => Ok((t, c)),
            _ => Err(DomainError::NotAggregated(self.name.clone())),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round half to even at one decimal place
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
