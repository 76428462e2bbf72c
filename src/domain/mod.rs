pub mod city;
pub mod day;
pub mod error;
pub mod hour;
pub mod ranking;

// Re-export commonly used types
pub use city::CityForecast;
pub use day::DayForecast;
pub use error::DomainError;
pub use hour::{CLEAR_CONDITIONS, HourForecast, WORK_HOURS};
pub use ranking::{RankedCity, RankedCityList, TieBreak};
