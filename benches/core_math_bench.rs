use criterion::{Criterion, criterion_group, criterion_main};
use narrative_viz::core::{Year, decile_breakpoints};
use narrative_viz::data::{CountryNameMap, Dataset, DatasetBundle, HappinessRow};
use narrative_viz::scatter::{AnnotationMode, ScatterViewModel};
use std::hint::black_box;

fn bench_dataset(countries: usize) -> Dataset {
    let rows: Vec<HappinessRow> = (0..countries)
        .map(|i| HappinessRow::new(format!("Country {i}"), format!("{:.3}", 8.0 - i as f64 * 0.02)))
        .collect();
    let population: Vec<(String, String)> = (0..countries)
        .map(|i| (format!("Country {i}"), (1_000_000 + i * 7_919).to_string()))
        .collect();
    let gdp: Vec<(String, String)> = (0..countries)
        .map(|i| (format!("Country {i}"), format!("{:.1}", 500.0 + (i * 613 % 90_000) as f64)))
        .collect();
    let bundle = DatasetBundle::default()
        .with_happiness(Year::Y2019, rows)
        .with_population(Year::Y2019, population)
        .with_gdp(Year::Y2019, gdp);
    Dataset::from_bundle(bundle, CountryNameMap::default())
}

fn bench_merge_year_160(c: &mut Criterion) {
    let dataset = bench_dataset(160);
    c.bench_function("merge_year_160", |b| {
        b.iter(|| black_box(dataset.merge_year(black_box(Year::Y2019))))
    });
}

fn bench_decile_breakpoints_10k(c: &mut Criterion) {
    let values: Vec<f64> = (0..10_000)
        .map(|i| f64::from(i * 7_919 % 100_000) + 0.5)
        .collect();
    c.bench_function("decile_breakpoints_10k", |b| {
        b.iter(|| black_box(decile_breakpoints(black_box(values.iter().copied()))))
    });
}

fn bench_scatter_filter_sweep(c: &mut Criterion) {
    let dataset = bench_dataset(160);
    let mut model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::MostHappy, 5);
    c.bench_function("scatter_filter_sweep", |b| {
        b.iter(|| {
            for index in 0..=10 {
                black_box(model.set_gdp_percentile_index(index));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_merge_year_160,
    bench_decile_breakpoints_10k,
    bench_scatter_filter_sweep
);
criterion_main!(benches);
