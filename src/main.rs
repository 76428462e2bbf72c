use std::env;
use std::sync::Arc;

use tokio::io::{BufWriter, Stdout};
use weather_rank::prelude::*;

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_args(env::args()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    if config.show_help {
        println!("{USAGE}");
        return;
    }

    init_tracing();
    CliApp::new("weather-rank")
        .run(|stdout| run_forecast(stdout, config))
        .await
}

/// Main application logic - ranks every registry city and reports the result
async fn run_forecast(stdout: BufWriter<Stdout>, config: AppConfig) -> Result<(), AppError> {
    let registry = Arc::new(CityRegistry::builtin());

    let source: Arc<dyn WeatherSource> = match &config.fixtures_dir {
        Some(dir) => Arc::new(FileWeatherSource::new(dir)),
        None => Arc::new(HttpWeatherSource::new(registry.clone())?),
    };

    // Abort on the first failed city unless asked to rank the rest
    let policy: Box<dyn ErrorPolicy> = if config.skip_failed {
        Box::new(SkipErrors)
    } else {
        Box::new(AbortOnError)
    };

    let mut pipeline = Pipeline::new(source, registry, policy)
        .with_termination(config.termination)
        .with_tie_break(config.tie_break);
    if let Some(workers) = config.workers {
        pipeline = pipeline.with_workers(workers);
    }
    if let Some(path) = config.report_path {
        pipeline = pipeline.with_report_path(path);
    }

    pipeline.run(stdout).await?;
    Ok(())
}
