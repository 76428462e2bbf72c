//! Weather liveability ranking.
//!
//! Retrieves multi-day hourly forecasts for a fixed set of cities, reduces
//! them to day and city statistics, ranks the cities and reports the result.
//! The work runs as a staged pipeline:
//!
//! retrieval fan-out → hand-off queue → calculation → ranking → reporting
//!
//! Each stage is its own task and talks to its neighbours only through
//! channels.

pub mod app;
pub mod domain;
pub mod engine;
pub mod io;
pub mod prelude;
pub mod streaming;
