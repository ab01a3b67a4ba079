use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion, SamplingMode, Throughput};
use generator_common::{build, DistributionSpec, Registry, DEFAULT_SELECTION};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::dataset_file::write_dataset;
use crate::pbar;

const SAMPLE_SIZE: usize = 10;

/// Built-in registry with every sample count replaced by `count`.
fn registry_with_count(count: usize) -> Registry {
    let builtin = Registry::builtin();
    DEFAULT_SELECTION
        .iter()
        .filter_map(|name| builtin.get(name))
        .fold(Registry::empty(), |registry, spec| {
            registry.with(DistributionSpec::new(spec.name.clone(), spec.kind, count))
        })
}

pub fn criterion_benchmark(c: &mut Criterion) {
    pbar::setup_logging(Some("error".to_string()));

    let mut group = c.benchmark_group("build_and_write");
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(10));

    for count in (0..=4).map(|exp| 1_000usize * 10usize.pow(exp) / 10) {
        let registry = registry_with_count(count);
        let total = (count * DEFAULT_SELECTION.len()) as u64;
        group.throughput(Throughput::Elements(total));
        group.bench_with_input(BenchmarkId::from_parameter(total), &registry, |b, registry| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(0);
                let batch = build(&DEFAULT_SELECTION, registry, &mut rng).expect("build batch");
                write_dataset(std::io::sink(), &DEFAULT_SELECTION, registry, black_box(&batch))
                    .expect("write batch");
            });
        });
    }
    group.finish();
}
