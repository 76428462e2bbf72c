use std::cmp::Ordering;

use super::city::CityForecast;
use super::error::DomainError;

/// How cities with equal `(avg_temp, avg_clear_hours)` are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Keep the order in which cities reached the ranking stage.
    /// That order follows fetch completion and varies between runs.
    #[default]
    ArrivalOrder,
    /// Order tied cities by name, ascending
    CityName,
}

/// A city together with its 1-based position in the ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCity {
    pub city: CityForecast,
    pub rank: usize,
}

/// The ranked batch: every city, best first, ranks `1..=N`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedCityList {
    pub cities: Vec<RankedCity>,
}

impl RankedCityList {
    /// Sort aggregated cities descending by `(avg_temp, avg_clear_hours)`
    /// and assign contiguous ranks.
    ///
    /// Every city must have its aggregates computed.
    pub fn rank(cities: Vec<CityForecast>, tie_break: TieBreak) -> Result<Self, DomainError> {
        let mut keyed = cities
            .into_iter()
            .map(|city| city.ranking_key().map(|key| (key, city)))
            .collect::<Result<Vec<_>, _>>()?;

        // sort_by is stable, so ArrivalOrder falls out of the input order
        keyed.sort_by(|(a_key, a), (b_key, b)| {
            let by_key = compare_desc(*a_key, *b_key);
            match tie_break {
                TieBreak::ArrivalOrder => by_key,
                TieBreak::CityName => by_key.then_with(|| a.name().cmp(b.name())),
            }
        });

        let cities = keyed
            .into_iter()
            .enumerate()
            .map(|(index, (_, city))| RankedCity {
                city,
                rank: index + 1,
            })
            .collect();

        Ok(Self { cities })
    }

    /// The top-ranked city, if any
    pub fn best(&self) -> Option<&RankedCity> {
        self.cities.first()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

fn compare_desc(a: (f64, f64), b: (f64, f64)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| b.1.total_cmp(&a.1))
}
