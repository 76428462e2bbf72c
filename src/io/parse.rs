use chrono::NaiveDate;
use serde::Deserialize;

use super::error::IoError;
use crate::domain::{DayForecast, HourForecast};

/// Provider payload as received; fields beyond these are ignored
#[derive(Debug, Deserialize, Default)]
pub struct RawForecastResponse {
    #[serde(default)]
    pub forecasts: Vec<RawDayForecast>,
}

/// One day of the provider payload
#[derive(Debug, Deserialize)]
pub struct RawDayForecast {
    pub date: String,
    #[serde(default)]
    pub hours: Vec<RawHourForecast>,
}

/// One hourly reading of the provider payload
#[derive(Debug, Deserialize)]
pub struct RawHourForecast {
    pub hour: RawHour,
    pub temp: i32,
    pub condition: String,
}

/// The provider sends hours as numeric strings; plain numbers are accepted too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawHour {
    Number(i64),
    Text(String),
}

impl RawForecastResponse {
    /// Decode a provider body
    pub fn from_slice(city: &str, body: &[u8]) -> Result<Self, IoError> {
        serde_json::from_slice(body).map_err(|e| IoError::malformed(city, e))
    }

    /// Parse this raw payload into typed days.
    ///
    /// Returns `None` when the provider had no forecast days at all.
    pub fn into_days(self, city: &str) -> Result<Option<Vec<DayForecast>>, IoError> {
        if self.forecasts.is_empty() {
            return Ok(None);
        }

        self.forecasts
            .into_iter()
            .map(|day| day.parse(city))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

impl RawDayForecast {
    /// Parse this raw day into a strongly-typed DayForecast
    pub fn parse(self, city: &str) -> Result<DayForecast, IoError> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| IoError::malformed(city, format!("date {:?}: {}", self.date, e)))?;

        let hours = self
            .hours
            .into_iter()
            .map(|hour| hour.parse(city))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DayForecast::new(date, hours))
    }
}

impl RawHourForecast {
    /// Parse this raw reading into a strongly-typed HourForecast
    pub fn parse(self, city: &str) -> Result<HourForecast, IoError> {
        let hour = match self.hour {
            RawHour::Number(n) => n,
            RawHour::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| IoError::malformed(city, format!("hour {:?}", s)))?,
        };

        HourForecast::new(hour, self.temp, self.condition)
            .map_err(|e| IoError::malformed(city, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "now": 1653553535,
        "info": {"lat": 55.75},
        "forecasts": [
            {
                "date": "2022-05-26",
                "week": 21,
                "hours": [
                    {"hour": "9", "temp": 10, "condition": "clear", "hour_ts": 1},
                    {"hour": 10, "temp": 11, "condition": "cloudy"}
                ]
            },
            {"date": "2022-05-27", "hours": []}
        ]
    }"#;

    #[test]
    fn parses_provider_body() {
        let raw = RawForecastResponse::from_slice("MOSCOW", BODY.as_bytes()).unwrap();
        let days = raw.into_days("MOSCOW").unwrap().unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date(), NaiveDate::from_ymd_opt(2022, 5, 26).unwrap());
        assert_eq!(days[0].hours().len(), 2);
        assert_eq!(days[0].hours()[0].hour(), 9);
        assert_eq!(days[0].hours()[1].condition(), "cloudy");
        assert!(days[1].is_empty());
    }

    #[test]
    fn empty_forecasts_is_no_data() {
        let raw = RawForecastResponse::from_slice("MOSCOW", br#"{"forecasts": []}"#).unwrap();
        assert!(raw.into_days("MOSCOW").unwrap().is_none());

        let raw = RawForecastResponse::from_slice("MOSCOW", b"{}").unwrap();
        assert!(raw.into_days("MOSCOW").unwrap().is_none());
    }

    #[test]
    fn invalid_json_is_malformed() {
        let result = RawForecastResponse::from_slice("PARIS", b"<html>");
        assert!(matches!(result, Err(IoError::MalformedResponse { city, .. }) if city == "PARIS"));
    }

    #[test]
    fn missing_temp_is_malformed() {
        let body = br#"{"forecasts": [{"date": "2022-05-26", "hours": [{"hour": 9, "condition": "clear"}]}]}"#;
        let result = RawForecastResponse::from_slice("PARIS", body);
        assert!(matches!(result, Err(IoError::MalformedResponse { .. })));
    }

    #[test]
    fn bad_date_is_malformed() {
        let body = br#"{"forecasts": [{"date": "26.05.2022", "hours": []}]}"#;
        let raw = RawForecastResponse::from_slice("PARIS", body).unwrap();
        assert!(matches!(
            raw.into_days("PARIS"),
            Err(IoError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn non_numeric_hour_is_malformed() {
        let body = br#"{"forecasts": [{"date": "2022-05-26", "hours": [{"hour": "noon", "temp": 1, "condition": "clear"}]}]}"#;
        let raw = RawForecastResponse::from_slice("PARIS", body).unwrap();
        assert!(matches!(
            raw.into_days("PARIS"),
            Err(IoError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn out_of_range_hour_is_malformed() {
        let body = br#"{"forecasts": [{"date": "2022-05-26", "hours": [{"hour": "24", "temp": 1, "condition": "clear"}]}]}"#;
        let raw = RawForecastResponse::from_slice("PARIS", body).unwrap();
        assert!(matches!(
            raw.into_days("PARIS"),
            Err(IoError::MalformedResponse { .. })
        ));
    }
}
