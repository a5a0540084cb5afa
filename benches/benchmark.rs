use criterion::{criterion_group, criterion_main, Criterion};

use wfobj::ParseOptions;

fn load_mixed_indices() {
    let path = format!("{}/tests/fixtures/mixed_indices.obj", env!("CARGO_MANIFEST_DIR"));
    wfobj::load_obj(path, ParseOptions::empty()).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let _ = env_logger::try_init();
    c.bench_function("load mixed_indices.obj", |b| b.iter(load_mixed_indices));
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = criterion_benchmark
);
criterion_main!(benches);
