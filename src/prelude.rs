//! Prelude module for convenient imports
//!
//! Import everything you need with: `use weather_rank::prelude::*;`

// Domain types
pub use crate::domain::{
    CityForecast, DayForecast, DomainError, HourForecast, RankedCity, RankedCityList, TieBreak,
};

// IO types
pub use crate::io::{
    CityRegistry, FileWeatherSource, HttpWeatherSource, IoError, RawForecastResponse,
    WeatherSource, render_report, render_table, write_report,
};

// Engine types
pub use crate::engine::{
    CalculationStage, EngineError, QueueTermination, RankingStage, Report, ReportingStage, Stage,
    StageMessage, handoff_queue,
};

// Streaming types
pub use crate::streaming::{AbortOnError, ErrorPolicy, Pipeline, RetrievalFanOut, SkipErrors};

// App types
pub use crate::app::{AppConfig, AppError, CliApp, USAGE, init_tracing};
