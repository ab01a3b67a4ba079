use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    sample_generator::benchmark::criterion_benchmark(c)
}

criterion_group!(build_throughput, criterion_benchmark);
criterion_main!(build_throughput);
