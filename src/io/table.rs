use tabled::builder::Builder;
use tabled::settings::Style;

use super::error::IoError;
use super::registry::CityRegistry;
use crate::domain::RankedCityList;

const CITY_DAY_HEADER: &str = "Город/день";
const AVERAGE_HEADER: &str = "Среднее";
const RANK_HEADER: &str = "Рейтинг";
const TEMP_ROW_LABEL: &str = "Температура, среднее";
const CLEAR_ROW_LABEL: &str = "Без осадков, часов";

/// Render the ranked batch as a console table, two rows per city.
///
/// Date columns come from the first city and are assumed common to all.
pub fn render_table(list: &RankedCityList, registry: &CityRegistry) -> Result<String, IoError> {
    let dates: Vec<String> = list
        .best()
        .map(|first| {
            first
                .city
                .forecasts()
                .iter()
                .map(|day| day.date().format("%d-%m").to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut builder = Builder::default();

    let mut header = vec![CITY_DAY_HEADER.to_string(), String::new()];
    header.extend(dates);
    header.push(AVERAGE_HEADER.to_string());
    header.push(RANK_HEADER.to_string());
    builder.push_record(header);

    for ranked in &list.cities {
        let city = &ranked.city;
        let display = registry.display_name(city.name())?;

        let mut temp_row = vec![display.to_string(), TEMP_ROW_LABEL.to_string()];
        temp_row.extend(city.forecasts().iter().map(|d| fmt_opt(d.avg_temp())));
        temp_row.push(fmt_mean(city.avg_temp()));
        temp_row.push(ranked.rank.to_string());
        builder.push_record(temp_row);

        let mut clear_row = vec![String::new(), CLEAR_ROW_LABEL.to_string()];
        clear_row.extend(
            city.forecasts()
                .iter()
                .map(|d| fmt_opt(d.clear_hour_count())),
        );
        clear_row.push(fmt_mean(city.avg_clear_hours()));
        clear_row.push(String::new());
        builder.push_record(clear_row);
    }

    let mut table = builder.build();
    table.with(Style::ascii());
    Ok(table.to_string())
}

fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// City means always show one decimal place
fn fmt_mean(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CityForecast, DayForecast, HourForecast, TieBreak};
    use chrono::NaiveDate;

    fn city(name: &str, temp: i32) -> CityForecast {
        let days = (26..=27)
            .map(|d| {
                DayForecast::new(
                    NaiveDate::from_ymd_opt(2022, 5, d).unwrap(),
                    vec![HourForecast::new(12, temp, "clear").unwrap()],
                )
            })
            .collect();
        let mut city = CityForecast::new(name, days);
        city.calculate_days();
        city.aggregate().unwrap();
        city
    }

    #[test]
    fn renders_header_and_two_rows_per_city() {
        let list = RankedCityList::rank(
            vec![city("MOSCOW", 12), city("CAIRO", 30)],
            TieBreak::ArrivalOrder,
        )
        .unwrap();

        let table = render_table(&list, &CityRegistry::builtin()).unwrap();

        assert!(table.contains("Город/день"));
        assert!(table.contains("26-05"));
        assert!(table.contains("27-05"));
        assert!(table.contains("Среднее"));
        assert!(table.contains("Рейтинг"));
        assert_eq!(table.matches("Температура, среднее").count(), 2);
        assert_eq!(table.matches("Без осадков, часов").count(), 2);

        // best city is listed first
        let cairo = table.find("Каир").unwrap();
        let moscow = table.find("Москва").unwrap();
        assert!(cairo < moscow);
        assert!(table.contains("30"));
    }

    #[test]
    fn city_means_keep_one_decimal() {
        let list = RankedCityList::rank(vec![city("MOSCOW", 15)], TieBreak::ArrivalOrder).unwrap();

        let table = render_table(&list, &CityRegistry::builtin()).unwrap();

        assert!(table.contains("| 15.0 "));
        assert!(table.contains("| 1.0 "));
        // day values stay integers
        assert!(table.contains("| 15 "));
    }

    #[test]
    fn unknown_city_fails_rendering() {
        let list = RankedCityList::rank(vec![city("ATLANTIS", 20)], TieBreak::ArrivalOrder)
            .unwrap();

        let result = render_table(&list, &CityRegistry::builtin());
        assert!(matches!(result, Err(IoError::UnknownCity(_))));
    }

    #[test]
    fn empty_list_renders_header_only() {
        let table = render_table(&RankedCityList::default(), &CityRegistry::builtin()).unwrap();
        assert!(table.contains("Рейтинг"));
        assert!(!table.contains("Температура"));
    }
}
