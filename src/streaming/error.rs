use tracing::{error, warn};

use crate::io::IoError;

/// Policy for per-city retrieval failures during fan-out
pub trait ErrorPolicy: Send + Sync {
    /// Handle a failure to retrieve or parse one city's forecast.
    /// Return true to continue without that city, false to abort the run.
    fn handle_source_error(&self, city: &str, error: &IoError) -> bool;
}

impl<P: ErrorPolicy + ?Sized> ErrorPolicy for Box<P> {
    fn handle_source_error(&self, city: &str, error: &IoError) -> bool {
        (**self).handle_source_error(city, error)
    }
}

/// Abort the whole run on the first failure
pub struct AbortOnError;

impl ErrorPolicy for AbortOnError {
    fn handle_source_error(&self, city: &str, error: &IoError) -> bool {
        error!(city, %error, "Retrieval failed (aborting)");
        false
    }
}

/// Drop the failing city from the ranking and carry on
pub struct SkipErrors;

impl ErrorPolicy for SkipErrors {
    fn handle_source_error(&self, city: &str, error: &IoError) -> bool {
        warn!(city, %error, "Retrieval failed (skipping city)");
        true
    }
}
