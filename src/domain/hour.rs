use std::ops::RangeInclusive;

use super::error::DomainError;

/// Hours whose readings feed the per-day aggregates
pub const WORK_HOURS: RangeInclusive<u8> = 9..=19;

/// Conditions counted as "no precipitation"
pub const CLEAR_CONDITIONS: [&str; 4] = ["clear", "partly-cloudy", "cloudy", "overcast"];

/// A single hourly reading, immutable once parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourForecast {
    hour: u8,
    temp: i32,
    condition: String,
}

impl HourForecast {
    /// Create an hourly reading, rejecting hours outside 0-23
    pub fn new(hour: i64, temp: i32, condition: impl Into<String>) -> Result<Self, DomainError> {
        let hour = u8::try_from(hour)
            .ok()
            .filter(|h| *h <= 23)
            .ok_or(DomainError::HourOutOfRange(hour))?;

        Ok(Self {
            hour,
            temp,
            condition: condition.into(),
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn temp(&self) -> i32 {
        self.temp
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Whether this reading falls inside the work-hour window
    pub fn in_work_hours(&self) -> bool {
        WORK_HOURS.contains(&self.hour)
    }

    /// Whether the condition belongs to the clear-condition set
    pub fn is_clear(&self) -> bool {
        CLEAR_CONDITIONS.contains(&self.condition.as_str())
    }
}
