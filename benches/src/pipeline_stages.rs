use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tokio::sync::{mpsc, oneshot};
use weather_rank::io::CityEntry;
use weather_rank::prelude::*;

const DAYS: usize = 5;

fn city_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("CITY{i:04}")).collect()
}

/// Five days of 24 hourly readings, temperature shifted by `seed`
fn days(seed: usize) -> Vec<DayForecast> {
    (0..DAYS)
        .map(|d| {
            let date = NaiveDate::from_ymd_opt(2022, 5, 26 + d as u32).unwrap();
            let hours = (0..24)
                .map(|h| {
                    let condition = if (h + seed) % 3 == 0 { "rain" } else { "clear" };
                    HourForecast::new(h as i64, (seed % 40) as i32 + h as i32 / 2, condition)
                        .unwrap()
                })
                .collect();
            DayForecast::new(date, hours)
        })
        .collect()
}

fn raw_body(seed: usize) -> String {
    let hours: Vec<String> = (0..24)
        .map(|h| format!(r#"{{"hour": "{h}", "temp": {}, "condition": "clear"}}"#, (seed + h) % 35))
        .collect();
    let day = format!(r#"{{"date": "2022-05-26", "hours": [{}]}}"#, hours.join(", "));
    format!(r#"{{"forecasts": [{day}, {day}, {day}]}}"#)
}

struct MemorySource {
    bodies: Vec<(String, String)>,
}

#[async_trait]
impl WeatherSource for MemorySource {
    async fn fetch(&self, city: &str) -> Result<RawForecastResponse, IoError> {
        let (_, body) = self
            .bodies
            .iter()
            .find(|(name, _)| name == city)
            .ok_or_else(|| IoError::UnknownCity(city.to_string()))?;
        RawForecastResponse::from_slice(city, body.as_bytes())
    }
}

/// Benchmark day statistics for a batch of cities
fn bench_calculate_days(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_days");

    for count in [15, 150, 1_500] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || {
                    city_names(count)
                        .into_iter()
                        .enumerate()
                        .map(|(i, name)| CityForecast::new(name, days(i)))
                        .collect::<Vec<_>>()
                },
                |mut cities| {
                    for city in &mut cities {
                        city.calculate_days();
                    }
                    black_box(cities)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark aggregation plus sort for a batch of calculated cities
fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for count in [15, 150, 1_500] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || {
                    city_names(count)
                        .into_iter()
                        .enumerate()
                        .map(|(i, name)| {
                            let mut city = CityForecast::new(name, days(i));
                            city.calculate_days();
                            city.aggregate().unwrap();
                            city
                        })
                        .collect::<Vec<_>>()
                },
                |cities| black_box(RankedCityList::rank(cities, TieBreak::CityName).unwrap()),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark the calculation and ranking stages wired by channels
fn bench_stage_chain(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("stage_chain");

    for count in [15, 150] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.to_async(&runtime).iter(|| async move {
                let (queue_tx, queue_rx) = handoff_queue(QueueTermination::OnClose);
                let (calc_tx, calc_rx) = mpsc::unbounded_channel();
                let (rank_tx, rank_rx) = oneshot::channel();

                let calculation = tokio::spawn(CalculationStage::new(queue_rx, calc_tx).run());
                let ranking = tokio::spawn(RankingStage::new(calc_rx, rank_tx).run());

                for (i, name) in city_names(count).into_iter().enumerate() {
                    queue_tx.send(CityForecast::new(name, days(i))).unwrap();
                }
                drop(queue_tx);

                calculation.await.unwrap().unwrap();
                ranking.await.unwrap().unwrap();
                black_box(rank_rx.await.unwrap())
            });
        });
    }

    group.finish();
}

/// Benchmark a whole run against an in-memory source
fn bench_end_to_end(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("end_to_end");

    for count in [15, 150] {
        let names = city_names(count);
        let source = Arc::new(MemorySource {
            bodies: names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), raw_body(i)))
                .collect(),
        });
        let registry = Arc::new(CityRegistry::new(names.iter().map(|name| CityEntry {
            key: name.clone(),
            endpoint: format!("memory://{name}"),
            display_name: name.clone(),
        })));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.to_async(&runtime).iter(|| {
                let source = Arc::clone(&source);
                let registry = Arc::clone(&registry);
                async move {
                    black_box(
                        Pipeline::new(source, registry, AbortOnError)
                            .run(tokio::io::sink())
                            .await
                            .unwrap(),
                    )
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_calculate_days,
    bench_ranking,
    bench_stage_chain,
    bench_end_to_end
);
criterion_main!(benches);
