pub mod error;
pub mod fan_out;
pub mod pipeline;

// Re-export commonly used types
pub use error::{AbortOnError, ErrorPolicy, SkipErrors};
pub use fan_out::{FanOutSummary, RetrievalFanOut, default_workers};
pub use pipeline::Pipeline;
