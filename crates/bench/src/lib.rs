use std::ops::RangeInclusive;
use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const RNG_SEED: u64 = 0x5EED_2026;

/// Criterion runtime budget: `(sample size, warm-up ms, measurement ms)`.
type RuntimeBudget = (usize, u64, u64);

const SMALL_RUNTIME: RuntimeBudget = (15, 100, 200);
const MEDIUM_RUNTIME: RuntimeBudget = (15, 500, 1_000);
const LARGE_RUNTIME: RuntimeBudget = (10, 800, 1_500);

fn apply_runtime<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, (samples, warm_up_ms, measure_ms): RuntimeBudget) {
    group.sample_size(samples);
    group.warm_up_time(Duration::from_millis(warm_up_ms));
    group.measurement_time(Duration::from_millis(measure_ms));
}

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    apply_runtime(group, SMALL_RUNTIME);
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    apply_runtime(group, MEDIUM_RUNTIME);
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    apply_runtime(group, LARGE_RUNTIME);
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

pub fn random_values<R: Rng + ?Sized>(rng: &mut R, n: usize, range: RangeInclusive<i64>) -> Vec<i64> {
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        values.push(rng.random_range(range.clone()));
    }
    values
}

/// `q` non-empty inclusive ranges `(l, r)` with `r < n`.
pub fn random_ranges<R: Rng + ?Sized>(rng: &mut R, n: usize, q: usize) -> Vec<(usize, usize)> {
    debug_assert!(n > 0);
    let mut ranges = Vec::with_capacity(q);
    for _ in 0..q {
        let l = rng.random_range(0..n);
        let r = rng.random_range(l..n);
        ranges.push((l, r));
    }
    ranges
}
