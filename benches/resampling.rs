use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sampling_dist::{Dataset, Mean, PearsonCorrelation, Resampler};

fn dataset() -> Dataset {
    let x: Vec<f64> = (0..5000).map(|i| ((i * 7919) % 5000) as f64).collect();
    let y: Vec<Option<f64>> = x
        .iter()
        .enumerate()
        .map(|(i, v)| if i % 9 == 0 { None } else { Some(0.3 * v + (i % 13) as f64) })
        .collect();
    Dataset::builder()
        .numeric_dense("x", x)
        .numeric("y", y)
        .build()
        .unwrap()
}

fn bench_resampling(c: &mut Criterion) {
    let data = dataset();
    let mut group = c.benchmark_group("resampling");
    group.sample_size(20);

    for parallel in [false, true] {
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_function(format!("mean_m100_{}", label), |b| {
            let resampler = Resampler::new().group_size(100).trials(1000).seed(1).parallel(parallel);
            b.iter(|| {
                let dist = resampler.run(&data, &Mean::new("x")).unwrap();
                black_box(dist.len())
            });
        });
    }

    group.bench_function("pearson_m400", |b| {
        let resampler = Resampler::new().group_size(400).trials(500).seed(2);
        b.iter(|| {
            let dist = resampler.run(&data, &PearsonCorrelation::new("x", "y")).unwrap();
            black_box(dist.len())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_resampling);
criterion_main!(benches);
