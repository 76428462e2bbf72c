pub mod calculation;
pub mod error;
pub mod queue;
pub mod ranking;
pub mod reporting;
pub mod stage;

// Re-export commonly used types
pub use calculation::CalculationStage;
pub use error::EngineError;
pub use queue::{QueueReceiver, QueueSender, QueueTermination, handoff_queue};
pub use ranking::RankingStage;
pub use reporting::{Report, ReportingStage};
pub use stage::{Stage, StageMessage};
