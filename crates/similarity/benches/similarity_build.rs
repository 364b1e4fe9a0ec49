//! Benchmarks for the similarity matrix build
//!
//! Run with: cargo bench --package similarity
//!
//! Uses a synthetic catalog sized like a city guide (a few hundred restaurants).

use catalog::{Amenities, Catalog, Cuisine, PriceRange, Restaurant};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use similarity::SimilarityEngine;

const DESCRIPTIONS: [&str; 6] = [
    "hand pulled noodles and dumplings",
    "wood fired pizza with a long natural wine list",
    "laneway cafe pouring specialty coffee",
    "spicy curries and street food classics",
    "fresh seafood by the bay",
    "plant based bowls and smoothies",
];

fn synthetic_catalog(size: u32) -> Catalog {
    let restaurants = (0..size)
        .map(|i| {
            let idx = i as usize;
            Restaurant::new(
                i + 1,
                format!("Restaurant {}", i + 1),
                Cuisine::ALL[idx % Cuisine::ALL.len()],
                PriceRange::ALL[idx % PriceRange::ALL.len()],
                3.0 + (i % 20) as f32 / 10.0,
            )
            .with_description(DESCRIPTIONS[idx % DESCRIPTIONS.len()])
            .with_suburb(if i % 3 == 0 { "Fitzroy" } else { "Melbourne" })
            .with_amenities(Amenities {
                has_takeaway: i % 2 == 0,
                has_lunch_specials: i % 5 == 0,
                student_discount: i % 7 == 0,
                ..Default::default()
            })
        })
        .collect();
    Catalog::from_parts(restaurants, vec![]).expect("synthetic catalog is valid")
}

fn bench_build_matrix(c: &mut Criterion) {
    let catalog = synthetic_catalog(300);
    let engine = SimilarityEngine::new();

    c.bench_function("similarity_build_300", |b| {
        b.iter(|| {
            let matrix = engine.build(black_box(&catalog));
            black_box(matrix)
        })
    });
}

fn bench_similar_query(c: &mut Criterion) {
    let catalog = synthetic_catalog(300);
    let matrix = SimilarityEngine::new().build(&catalog);

    c.bench_function("similar_top5", |b| {
        b.iter(|| {
            let ids = matrix.similar(black_box(42), black_box(5));
            black_box(ids)
        })
    });
}

criterion_group!(benches, bench_build_matrix, bench_similar_query);
criterion_main!(benches);
