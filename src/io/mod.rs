pub mod error;
pub mod parse;
pub mod registry;
pub mod report_writer;
pub mod source;
pub mod table;

// Re-export commonly used types
pub use error::IoError;
pub use parse::{RawDayForecast, RawForecastResponse, RawHourForecast};
pub use registry::{CityEntry, CityRegistry};
pub use report_writer::{render_report, write_report};
pub use source::{FileWeatherSource, HttpWeatherSource, WeatherSource};
pub use table::render_table;
