use bitsets::{BitSet, BitSetPair, MutableBitSet, UnsafeBitSet};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::prelude::*;
use rand::rngs::SmallRng;

struct Parameters((f64, usize));

pub fn scan_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("BitSet::next_set_bit");
    for sparsity in [0.5, 0.01, 0.0001] {
        for size in [1000usize, 100_000usize] {
            let parameters = Parameters((sparsity, size));
            let bits = random_bitset(size, sparsity);
            group.bench_with_input(BenchmarkId::from_parameter(&parameters), &bits, |bencher, bits| {
                bencher.iter(|| {
                    let mut count = 0;
                    let mut cursor = bits.next_set_bit(0);
                    while let Some(index) = cursor {
                        count += 1;
                        cursor = bits.next_set_bit(index + 1);
                    }
                    count
                });
            });
        }
    }
    group.finish();
}

pub fn for_each_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("BitSet::for_each_set_bit");
    for sparsity in [0.5, 0.01] {
        for size in [1000usize, 100_000usize] {
            let parameters = Parameters((sparsity, size));
            let bits = random_bitset(size, sparsity).to_unsafe();
            group.bench_with_input(BenchmarkId::from_parameter(&parameters), &bits, |bencher, bits| {
                bencher.iter(|| {
                    let mut sum = 0usize;
                    bits.for_each_set_bit(|index| sum = sum.wrapping_add(index));
                    sum
                });
            });
        }
    }
    group.finish();
}

pub fn pair_count_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("BitSetPair::and_count");
    for size in [1000usize, 100_000usize, 1_000_000usize] {
        let parameters = Parameters((0.5, size));
        let pair = (random_bitset(size, 0.5), random_bitset(size, 0.5).to_immutable());
        group.bench_with_input(BenchmarkId::from_parameter(&parameters), &pair, |bencher, (left, right)| {
            bencher.iter(|| left.and_count(right));
        });
    }
    group.finish();
}

pub fn combine_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("MutableBitSet::or");
    for size in [1000usize, 100_000usize, 1_000_000usize] {
        let parameters = Parameters((0.5, size));
        group.bench_with_input(BenchmarkId::from_parameter(&parameters), &size, |bencher, &size| {
            bencher.iter_batched(
                || (random_bitset(size, 0.5), random_bitset(size, 0.5)),
                |(mut left, right)| {
                    left.or(&right);
                    left
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

pub fn quick_set_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("UnsafeBitSet::set_quick");
    for size in [1000usize, 100_000usize] {
        let parameters = Parameters((1.0, size));
        group.bench_with_input(BenchmarkId::from_parameter(&parameters), &size, |bencher, &size| {
            bencher.iter_batched(
                || UnsafeBitSet::new(size),
                |mut bits| {
                    for index in (0..size).step_by(3) {
                        // SAFETY: index < size == bits.len().
                        unsafe { bits.set_quick(index) };
                    }
                    bits
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (sparsity, size) = self.0;
        write!(f, "(sparsity={sparsity}, size={size})")?;
        Ok(())
    }
}

criterion_group!(
    benches,
    scan_benchmark,
    for_each_benchmark,
    pair_count_benchmark,
    combine_benchmark,
    quick_set_benchmark,
);
criterion_main!(benches);

fn random_bitset(length: usize, sparsity: f64) -> MutableBitSet {
    let mut random_number_generator = SmallRng::seed_from_u64(length as u64);
    if sparsity == 0.5 {
        return MutableBitSet::random(length, &mut random_number_generator);
    }
    let mut bits = MutableBitSet::new(length);
    for index in 0..length {
        if random_number_generator.gen_bool(sparsity) {
            bits.set(index);
        }
    }
    bits
}
