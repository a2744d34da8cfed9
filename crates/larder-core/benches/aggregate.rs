use std::collections::BTreeSet;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use larder_core::view::GroceryView;
use larder_core::{RecipeCard, aggregate};

const PANTRY: &[&str] = &[
    "2 eggs",
    "1 cup milk",
    "1 tsp salt",
    "2 cloves garlic",
    "1 onion",
    "olive oil",
    "1 lb chicken thighs",
    "fresh basil",
    "1 can tomatoes",
    "parmesan",
];

/// Cards sized like a seasonal recipe page.
fn page(recipes: usize) -> Vec<RecipeCard> {
    (0..recipes)
        .map(|i| {
            let lines = (0..8).map(|j| {
                let base = PANTRY[(i * 3 + j) % PANTRY.len()];
                if j % 3 == 0 {
                    format!("- {}", base.to_uppercase())
                } else {
                    format!("{base} {}", j % 4)
                }
            });
            RecipeCard::new(&format!("Recipe {i}"), lines)
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [12_usize, 48, 200] {
        let cards = page(size);
        let selection: BTreeSet<String> = cards.iter().step_by(2).map(|c| c.id.clone()).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &cards, |b, cards| {
            b.iter(|| black_box(aggregate(&selection, cards).len()));
        });
    }

    group.finish();
}

fn bench_view(c: &mut Criterion) {
    let cards = page(48);
    let selection: BTreeSet<String> = cards.iter().map(|c| c.id.clone()).collect();
    let aggregation = aggregate(&selection, &cards);
    let purchased: BTreeSet<String> = aggregation.keys().step_by(3).map(str::to_string).collect();

    c.bench_function("view.build", |b| {
        b.iter(|| black_box(GroceryView::build(&aggregation, &purchased).rows.len()));
    });
}

criterion_group!(benches, bench_aggregate, bench_view);
criterion_main!(benches);
