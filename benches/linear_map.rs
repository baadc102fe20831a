#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use linprobe::LinearHashMap;
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = vec((any::<String>(), any::<String>()), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let linear_map: LinearHashMap<_, _> = items.iter().cloned().collect();
    let rust_map: HashMap<_, _> = items.iter().cloned().collect();

    let mut group = c.benchmark_group("Hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    group.bench_function("linear insert", |b| {
        b.iter_batched(
            || items.clone(),
            |items| {
                let mut map = LinearHashMap::new();
                for (key, value) in items {
                    map.insert(key, value);
                }
                black_box(map)
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("rust std insert", |b| {
        b.iter_batched(
            || items.clone(),
            |items| {
                let mut map = HashMap::new();
                for (key, value) in items {
                    map.insert(key, value);
                }
                black_box(map)
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("linear get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(linear_map.get(key));
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(rust_map.get(key));
            }
        });
    });
    group.bench_function("linear remove", |b| {
        b.iter_batched(
            || linear_map.clone(),
            |mut map| {
                for (key, _) in items.iter().step_by(2) {
                    map.remove(key);
                }
                black_box(map)
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("rust std remove", |b| {
        b.iter_batched(
            || rust_map.clone(),
            |mut map| {
                for (key, _) in items.iter().step_by(2) {
                    map.remove(key);
                }
                black_box(map)
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, hash_map_benches);

criterion_main!(benches);
