use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use statrng_core_rs::bits::{biased_word, binomial};
use statrng_core_rs::{Pcg32x4, Pcg64};

// ============================================================================
// Generators: 64-bit scalar vs 256-bit vector
// ============================================================================

fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("Generators");

    let mut scalar = Pcg64::new(50);
    group.throughput(Throughput::Bytes(8));
    group.bench_function("pcg64 (64 bits)", |b| b.iter(|| black_box(scalar.next())));

    group.throughput(Throughput::Bytes(32));
    group.bench_function("pcg64 x4 (256 bits)", |b| {
        b.iter(|| {
            black_box([scalar.next(), scalar.next(), scalar.next(), scalar.next()])
        })
    });

    let mut vector = Pcg32x4::new(10, 20, 30, 40);
    group.bench_function("pcg32x4 (256 bits)", |b| {
        b.iter(|| black_box(vector.next_block()))
    });

    group.finish();
}

// ============================================================================
// Samplers
// ============================================================================

fn bench_samplers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Samplers");
    let mut rng = Pcg64::new(50);

    // n = 1 runs all m digits: m generator calls per word
    for m in [1u32, 8, 32] {
        group.bench_with_input(BenchmarkId::new("biased_word", m), &m, |b, &m| {
            b.iter(|| black_box(biased_word(&mut rng, 1, m)))
        });
    }

    // 64 trials: one biased word plus counting overhead
    group.bench_function("binomial k=64 p=1/256", |b| {
        b.iter(|| black_box(binomial(&mut rng, 64, 1, 8)))
    });

    group.bench_function("uniform [1, 6]", |b| {
        b.iter(|| black_box(rng.uniform(1, 6)))
    });

    group.finish();
}

criterion_group!(benches, bench_generators, bench_samplers);
criterion_main!(benches);
