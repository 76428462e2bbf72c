use std::path::PathBuf;
use std::time::Duration;

use super::error::AppError;
use crate::domain::TieBreak;
use crate::engine::QueueTermination;

pub const USAGE: &str = "\
Usage: weather-rank [options]

Options:
  --report <path>        JSON report path (default: report.json)
  --no-report            do not write the JSON report
  --workers <n>          concurrent forecast requests
  --queue-timeout <secs> end calculation input after <secs> of silence
  --tie-break <mode>     order of fully tied cities: arrival | name
  --skip-failed          rank the remaining cities when one fails
  --fixtures <dir>       read <dir>/<city>-response.json instead of HTTP
  -h, --help             show this message";

const DEFAULT_REPORT_PATH: &str = "report.json";

/// Run settings taken from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub report_path: Option<PathBuf>,
    pub workers: Option<usize>,
    pub termination: QueueTermination,
    pub tie_break: TieBreak,
    pub skip_failed: bool,
    pub fixtures_dir: Option<PathBuf>,
    pub show_help: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            report_path: Some(PathBuf::from(DEFAULT_REPORT_PATH)),
            workers: None,
            termination: QueueTermination::OnClose,
            tie_break: TieBreak::ArrivalOrder,
            skip_failed: false,
            fixtures_dir: None,
            show_help: false,
        }
    }
}

impl AppConfig {
    /// Parse and validate command-line arguments (program name first)
    pub fn from_args<I>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().skip(1);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--report" => config.report_path = Some(PathBuf::from(value(&arg, args.next())?)),
                "--no-report" => config.report_path = None,
                "--workers" => {
                    let raw = value(&arg, args.next())?;
                    let workers = raw
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| invalid(format!("--workers expects a positive integer, got {raw:?}")))?;
                    config.workers = Some(workers);
                }
                "--queue-timeout" => {
                    let raw = value(&arg, args.next())?;
                    let secs = raw
                        .parse::<f64>()
                        .ok()
                        .filter(|s| s.is_finite() && *s > 0.0)
                        .ok_or_else(|| invalid(format!("--queue-timeout expects positive seconds, got {raw:?}")))?;
                    config.termination = QueueTermination::Timeout(Duration::from_secs_f64(secs));
                }
                "--tie-break" => {
                    config.tie_break = match value(&arg, args.next())?.as_str() {
                        "arrival" => TieBreak::ArrivalOrder,
                        "name" => TieBreak::CityName,
                        other => {
                            return Err(invalid(format!(
                                "--tie-break expects arrival or name, got {other:?}"
                            )));
                        }
                    }
                }
                "--skip-failed" => config.skip_failed = true,
                "--fixtures" => config.fixtures_dir = Some(PathBuf::from(value(&arg, args.next())?)),
                "-h" | "--help" => config.show_help = true,
                other => return Err(invalid(format!("unknown argument {other:?}"))),
            }
        }

        Ok(config)
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String, AppError> {
    next.ok_or_else(|| invalid(format!("{flag} needs a value")))
}

fn invalid(message: String) -> AppError {
    AppError::InvalidArguments(message)
}
