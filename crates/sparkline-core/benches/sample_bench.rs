use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use sparkline_core::{sample, Downsample, Observation, SampleOptions};

fn gen_observations(n: usize) -> Vec<Observation> {
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        // session hours move, overnight stretches repeat the close
        let session = (i / 390) % 2 == 0;
        let y = if session { 100.0 + (i as f64 * 0.01).sin() * 10.0 + i as f64 * 0.0001 } else { 100.0 };
        v.push(Observation::new(y, 1_700_000_000 + i as i64 * 60));
    }
    // feeds do not promise ordering
    v.reverse();
    v
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    for &n in &[1_000usize, 10_000usize, 50_000usize] {
        let data = gen_observations(n);
        for (name, downsample) in [("stride", Downsample::Stride), ("lttb", Downsample::Lttb)] {
            let opts = SampleOptions::multi_day().with_downsample(downsample).with_fill(true);
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_{name}")), &opts, |b, o| {
                b.iter_batched(
                    || data.clone(),
                    |d| { let _ = black_box(sample(&d, o)); },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sample);
criterion_main!(benches);
