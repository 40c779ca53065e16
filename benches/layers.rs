//! benches/layers.rs
//! Layer chain resolution over chains of increasing length
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sops_layers::resolve_layers;
use std::fs;
use std::hint::black_box;

fn layer_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_layers");
    let dir = tempfile::tempdir().unwrap();

    for i in 1..1000 {
        fs::write(dir.path().join(format!("secrets{i:04}.yaml")), b"{}").unwrap();
    }

    for &depth in &[2u32, 10, 100, 1000] {
        let path = dir.path().join(format!("secrets{depth:04}.yaml"));
        group.bench_with_input(BenchmarkId::new("depth", depth), &path, |b, path| {
            b.iter(|| black_box(resolve_layers(black_box(path)).unwrap()));
        });
    }

    // Fails at the first stat, so this measures parsing and template rendering alone
    group.bench_function("missing_first_layer", |b| {
        let path = dir.path().join("other0005.yaml");
        b.iter(|| black_box(resolve_layers(black_box(&path)).unwrap_err()));
    });

    group.finish();
}

criterion_group!(benches, layer_benches);
criterion_main!(benches);
