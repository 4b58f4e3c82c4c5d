use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kaal_oracle::MeanMotionOracle;
use kaal_search::{
    BoundaryConfig, BoundaryPolicy, MuhurtaActivity, PanchangConfig, ScanConfig, element_index,
    find_boundary, find_muhurta, panchang_elements,
};
use kaal_time::{GeoLocation, Instant, Interval};
use kaal_vedic_base::Classifier;

fn start() -> Instant {
    Instant::new(
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap(),
        GeoLocation::new(28.6139, 77.2090, 0.0),
    )
}

fn boundary_bench(c: &mut Criterion) {
    let oracle = MeanMotionOracle::default();
    let at = start();
    let index = element_index(&oracle, Classifier::Tithi, &at).expect("sample should succeed");

    let mut group = c.benchmark_group("search_boundary");
    group.sample_size(20);
    group.bench_function("tithi_end", |b| {
        b.iter(|| {
            find_boundary(
                black_box(&at),
                index,
                |t| element_index(&oracle, Classifier::Tithi, t),
                &BoundaryConfig::default(),
            )
            .expect("boundary should be found")
        })
    });
    group.bench_function("panchang_elements", |b| {
        b.iter(|| {
            panchang_elements(
                black_box(&oracle),
                black_box(&at),
                &PanchangConfig::default(),
                BoundaryPolicy::NominalFallback,
            )
        })
    });
    group.finish();
}

fn muhurta_bench(c: &mut Criterion) {
    let oracle = MeanMotionOracle::default();
    let range = Interval::new(start(), start() + TimeDelta::days(30)).expect("valid range");

    let mut group = c.benchmark_group("search_muhurta");
    group.sample_size(20);
    group.bench_function("vehicle_30_days", |b| {
        b.iter(|| {
            find_muhurta(
                black_box(&oracle),
                black_box(&range),
                MuhurtaActivity::VehiclePurchase,
                &ScanConfig::default(),
            )
            .expect("scan should succeed")
        })
    });
    group.finish();
}

criterion_group!(benches, boundary_bench, muhurta_bench);
criterion_main!(benches);
