use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use super::error::IoError;
use crate::domain::{CityForecast, DayForecast, RankedCityList};

/// JSON view of the ranked batch with hour-level readings left out
#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub cities: Vec<ReportEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ReportEntry<'a> {
    pub city: ReportCity<'a>,
    pub rank: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCity<'a> {
    pub name: &'a str,
    pub forecasts: Vec<ReportDay>,
    pub avg_temp: Option<f64>,
    pub avg_clear_hours: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDay {
    pub date: NaiveDate,
    pub avg_temp: Option<i32>,
    pub clear_hour_count: Option<u32>,
}

impl<'a> From<&'a RankedCityList> for ReportDocument<'a> {
    fn from(list: &'a RankedCityList) -> Self {
        Self {
            cities: list
                .cities
                .iter()
                .map(|ranked| ReportEntry {
                    city: ReportCity::from(&ranked.city),
                    rank: ranked.rank,
                })
                .collect(),
        }
    }
}

impl<'a> From<&'a CityForecast> for ReportCity<'a> {
    fn from(city: &'a CityForecast) -> Self {
        Self {
            name: city.name(),
            forecasts: city.forecasts().iter().map(ReportDay::from).collect(),
            avg_temp: city.avg_temp(),
            avg_clear_hours: city.avg_clear_hours(),
        }
    }
}

impl From<&DayForecast> for ReportDay {
    fn from(day: &DayForecast) -> Self {
        Self {
            date: day.date(),
            avg_temp: day.avg_temp(),
            clear_hour_count: day.clear_hour_count(),
        }
    }
}

/// Render the ranked batch as pretty-printed JSON
pub fn render_report(list: &RankedCityList) -> Result<String, IoError> {
    Ok(serde_json::to_string_pretty(&ReportDocument::from(list))?)
}

/// Persist the ranked batch as JSON at `path`
pub async fn write_report(list: &RankedCityList, path: impl AsRef<Path>) -> Result<(), IoError> {
    let path = path.as_ref();
    let json = render_report(list)?;

    info!(path = %path.display(), cities = list.len(), "Writing JSON report");
    tokio::fs::write(path, json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HourForecast, TieBreak};
    use serde_json::{Value, json};

    fn ranked() -> RankedCityList {
        let mut city = CityForecast::new(
            "MOSCOW",
            vec![DayForecast::new(
                NaiveDate::from_ymd_opt(2022, 5, 26).unwrap(),
                vec![
                    HourForecast::new(9, 10, "clear").unwrap(),
                    HourForecast::new(19, 20, "rain").unwrap(),
                ],
            )],
        );
        city.calculate_days();
        city.aggregate().unwrap();
        RankedCityList::rank(vec![city], TieBreak::ArrivalOrder).unwrap()
    }

    #[test]
    fn renders_expected_shape_without_hours() {
        let json: Value = serde_json::from_str(&render_report(&ranked()).unwrap()).unwrap();

        assert_eq!(
            json,
            json!({
                "cities": [{
                    "city": {
                        "name": "MOSCOW",
                        "forecasts": [{
                            "date": "2022-05-26",
                            "avgTemp": 15,
                            "clearHourCount": 1
                        }],
                        "avgTemp": 15.0,
                        "avgClearHours": 1.0
                    },
                    "rank": 1
                }]
            })
        );
    }

    #[test]
    fn renders_empty_list() {
        let json: Value =
            serde_json::from_str(&render_report(&RankedCityList::default()).unwrap()).unwrap();
        assert_eq!(json, json!({"cities": []}));
    }

    #[tokio::test]
    async fn writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_report(&ranked(), &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"name\": \"MOSCOW\""));
        assert!(!written.contains("hours"));
    }
}
