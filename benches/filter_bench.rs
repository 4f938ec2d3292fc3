//! Criterion benchmarks for the filter engine.
//!
//! Measures predicate evaluation and ranking over a synthetic roster
//! the size of a full five-page aggregation (125 records) and well
//! beyond it.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use talent_gate::domain::builder::{normalize, RawPassport, RawProfile};
use talent_gate::domain::filter;
use talent_gate::domain::search::SearchParams;
use talent_gate::domain::Builder;

const LOCATIONS: [&str; 4] = ["Lisbon", "Lagos", "Berlin", "Remote"];
const TAGS: [&str; 5] = ["DeFi", "NFT", "Security", "Design", "Infra"];

fn roster(size: u64) -> Vec<Builder> {
    (0..size)
        .map(|i| {
            normalize(RawPassport {
                passport_id: Some(i),
                passport_profile: Some(RawProfile {
                    name: Some(format!("builder{i}")),
                    bio: Some(format!("building things #{i}")),
                    location: Some(LOCATIONS[(i % 4) as usize].to_string()),
                    tags: Some(vec![TAGS[(i % 5) as usize].to_string()]),
                    ..RawProfile::default()
                }),
                score: Some(((i * 37) % 100) as f64),
                ..RawPassport::default()
            })
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_apply");

    let unfiltered = SearchParams::default();
    let compound = SearchParams {
        min_score: Some(40.0),
        skills: Some("defi, security".to_string()),
        location: Some("lisbon".to_string()),
        activity: Some("building".to_string()),
    };

    for size in [125u64, 1_000, 10_000] {
        let builders = roster(size);

        group.bench_with_input(
            BenchmarkId::new("unfiltered_sort", size),
            &builders,
            |b, builders| {
                b.iter(|| filter::apply(black_box(builders.clone()), black_box(&unfiltered)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("compound_filters", size),
            &builders,
            |b, builders| {
                b.iter(|| filter::apply(black_box(builders.clone()), black_box(&compound)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
