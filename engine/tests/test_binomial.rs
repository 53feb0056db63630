//! Binomial sampling by bit counting

use proptest::prelude::*;
use statrng_core_rs::bits::binomial;
use statrng_core_rs::Pcg64;

const SAMPLES: u64 = 20_000;

fn sample_mean(seed: u64, k: u64, n: u64, m: u32) -> f64 {
    let mut rng = Pcg64::new(seed);
    let total: u64 = (0..SAMPLES).map(|_| binomial(&mut rng, k, n, m)).sum();
    total as f64 / SAMPLES as f64
}

#[test]
fn test_mean_matches_kp() {
    // (k, n, m, expected mean)
    let cases = [
        (1000, 1, 2, 250.0),
        (64, 1, 1, 32.0),
        (65, 3, 3, 24.375),
        (10, 255, 8, 9.9609375),
        (1, 1, 4, 0.0625),
    ];

    for (k, n, m, expected) in cases {
        let mean = sample_mean(k + n, k, n, m);
        let p = n as f64 / (1u64 << m) as f64;
        let variance = k as f64 * p * (1.0 - p);
        let tolerance = 6.0 * (variance / SAMPLES as f64).sqrt();
        assert!(
            (mean - expected).abs() <= tolerance,
            "k={} p={}/2^{}: mean {} expected {} ± {}",
            k,
            n,
            m,
            mean,
            expected,
            tolerance
        );
    }
}

#[test]
fn test_single_trial_is_bernoulli() {
    let mut rng = Pcg64::new(21);
    for _ in 0..1000 {
        assert!(binomial(&mut rng, 1, 1, 1) <= 1);
    }
}

#[test]
fn test_binomial_deterministic() {
    let mut rng1 = Pcg64::new(404);
    let mut rng2 = Pcg64::new(404);
    for _ in 0..100 {
        assert_eq!(binomial(&mut rng1, 500, 7, 5), binomial(&mut rng2, 500, 7, 5));
    }
}

proptest! {
    #[test]
    fn prop_successes_never_exceed_trials(
        seed in 1u64..,
        k in 1u64..1000,
        m in 1u32..=16,
        n_raw in 1u64..,
    ) {
        let n = 1 + n_raw % ((1u64 << m) - 1);
        let mut rng = Pcg64::new(seed);
        prop_assert!(binomial(&mut rng, k, n, m) <= k);
    }
}
