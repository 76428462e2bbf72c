use chrono::NaiveDate;

use super::hour::HourForecast;

/// One calendar day of hourly readings plus the statistics derived from them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayForecast {
    date: NaiveDate,
    hours: Vec<HourForecast>,
    avg_temp: Option<i32>,
    clear_hour_count: Option<u32>,
}

impl DayForecast {
    /// Create a day with statistics not yet calculated
    pub fn new(date: NaiveDate, hours: Vec<HourForecast>) -> Self {
        Self {
            date,
            hours,
            avg_temp: None,
            clear_hour_count: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Hourly readings in provider order
    pub fn hours(&self) -> &[HourForecast] {
        &self.hours
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Floored mean temperature over the work-hour window, once calculated
    pub fn avg_temp(&self) -> Option<i32> {
        self.avg_temp
    }

    /// Number of clear work hours, once calculated
    pub fn clear_hour_count(&self) -> Option<u32> {
        self.clear_hour_count
    }

    /// Compute both day statistics from the work-hour readings.
    ///
    /// The mean uses floor division so negative sums round toward negative
    /// infinity. A day with no work-hour readings gets `0` for both values.
    pub fn calculate(&mut self) {
        let (sum, count, clear) = self
            .hours
            .iter()
            .filter(|h| h.in_work_hours())
            .fold((0i64, 0i64, 0u32), |(sum, count, clear), h| {
                (
                    sum + i64::from(h.temp()),
                    count + 1,
                    clear + u32::from(h.is_clear()),
                )
            });

        let avg = if count == 0 { 0 } else { sum.div_euclid(count) };
        // a mean of i32 readings always fits in i32
        self.avg_temp = Some(avg as i32);
        self.clear_hour_count = Some(clear);
    }
}
