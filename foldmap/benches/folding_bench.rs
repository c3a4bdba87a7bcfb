use criterion::{black_box, criterion_group, criterion_main, Criterion};
use foldmap::FoldingMap;
use std::collections::HashMap;

/// Deterministic mixed-case keys so the folding path actually does work.
fn generate_keys(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| match i % 3 {
            0 => format!("Key-{i}"),
            1 => format!("KEY-{i}"),
            _ => format!("key-{i}"),
        })
        .collect()
}

fn benchmark_folding_map(c: &mut Criterion) {
    for &size in &[1_000, 100_000] {
        let mut group = c.benchmark_group(format!("size={size}"));

        let keys = generate_keys(size);

        group.bench_function("FoldingMap - insert", |b| {
            b.iter(|| {
                let mut map: FoldingMap<String, usize> = FoldingMap::new();
                for (i, key) in keys.iter().enumerate() {
                    map.insert(key.clone(), i);
                }
                black_box(map.len())
            })
        });

        group.bench_function("HashMap<lowercased> - insert", |b| {
            b.iter(|| {
                let mut map: HashMap<String, usize> = HashMap::new();
                for (i, key) in keys.iter().enumerate() {
                    map.insert(key.to_lowercase(), i);
                }
                black_box(map.len())
            })
        });

        let mut folding: FoldingMap<String, usize> = FoldingMap::new();
        let mut lowered: HashMap<String, usize> = HashMap::new();
        for (i, key) in keys.iter().enumerate() {
            folding.insert(key.clone(), i);
            lowered.insert(key.to_lowercase(), i);
        }

        group.bench_function("FoldingMap - get", |b| {
            b.iter(|| {
                for key in &keys {
                    black_box(folding.get(key.as_str()));
                }
            })
        });

        group.bench_function("HashMap<lowercased> - get", |b| {
            b.iter(|| {
                for key in &keys {
                    black_box(lowered.get(&key.to_lowercase()));
                }
            })
        });

        group.finish();
    }
}

criterion_group!(benches, benchmark_folding_map);
criterion_main!(benches);
