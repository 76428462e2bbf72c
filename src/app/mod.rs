pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use cli::CliApp;
pub use config::{AppConfig, USAGE};
pub use error::AppError;
pub use logging::init_tracing;
