use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::error::IoError;
use super::parse::RawForecastResponse;
use super::registry::CityRegistry;

/// Anything that can produce the raw multi-day forecast for a city key
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch the raw forecast for one city
    async fn fetch(&self, city: &str) -> Result<RawForecastResponse, IoError>;
}

#[async_trait]
impl<S: WeatherSource + ?Sized> WeatherSource for Arc<S> {
    async fn fetch(&self, city: &str) -> Result<RawForecastResponse, IoError> {
        (**self).fetch(city).await
    }
}

/// Weather source backed by the provider's HTTP endpoints
pub struct HttpWeatherSource {
    client: reqwest::Client,
    registry: Arc<CityRegistry>,
}

impl HttpWeatherSource {
    /// Per-request timeout; there is no retry
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(registry: Arc<CityRegistry>) -> Result<Self, IoError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("weather-rank/", env!("CARGO_PKG_VERSION")))
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IoError::unavailable("*", e))?;

        Ok(Self { client, registry })
    }
}

#[async_trait]
impl WeatherSource for HttpWeatherSource {
    async fn fetch(&self, city: &str) -> Result<RawForecastResponse, IoError> {
        let url = self.registry.endpoint(city)?;
        debug!(city, url, "Requesting forecast");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| IoError::unavailable(city, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IoError::unavailable(city, format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| IoError::unavailable(city, e))?;

        RawForecastResponse::from_slice(city, &body)
    }
}

/// Weather source reading `<dir>/<city>-response.json` fixtures from disk
pub struct FileWeatherSource {
    dir: PathBuf,
}

impl FileWeatherSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, city: &str) -> PathBuf {
        self.dir
            .join(format!("{}-response.json", city.to_lowercase()))
    }
}

#[async_trait]
impl WeatherSource for FileWeatherSource {
    async fn fetch(&self, city: &str) -> Result<RawForecastResponse, IoError> {
        let path = self.path_for(city);
        debug!(city, path = %path.display(), "Reading forecast fixture");

        let body = tokio::fs::read(&path)
            .await
            .map_err(|e| IoError::unavailable(city, format!("{}: {}", path.display(), e)))?;

        RawForecastResponse::from_slice(city, &body)
    }
}
