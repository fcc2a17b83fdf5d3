//! Dirichlet-style subject weight allocation.
//!
//! Normalized Gamma draws over a perturbed concentration vector: each
//! student gets one or two boosted subjects and one weakened subject,
//! so generated scores skew by individual strength instead of splitting
//! the total proportionally.

use crate::rng::AtlasRng;
use crate::subject::SUBJECT_COUNT;

/// Base concentration, biased toward chinese/math/english the way real
/// exam totals weight them.
pub const BASE_CONCENTRATION: [f64; SUBJECT_COUNT] = [3.3, 3.3, 3.1, 2.1, 1.9, 1.8];

const TWO_STRENGTHS_PROBABILITY: f64 = 0.42;
const STRENGTH_BOOST: (f64, f64) = (0.8, 1.7);
const WEAKNESS_FACTOR: (f64, f64) = (0.72, 0.92);

/// Allocate six non-negative subject weights summing to 1.
pub fn allocate(rng: &mut AtlasRng) -> [f64; SUBJECT_COUNT] {
    let mut alpha = BASE_CONCENTRATION;

    let first = rng.next_u64_below(SUBJECT_COUNT as u64) as usize;
    alpha[first] += rng.uniform(STRENGTH_BOOST.0, STRENGTH_BOOST.1);
    if rng.chance(TWO_STRENGTHS_PROBABILITY) {
        let mut second = rng.next_u64_below(SUBJECT_COUNT as u64) as usize;
        while second == first {
            second = rng.next_u64_below(SUBJECT_COUNT as u64) as usize;
        }
        alpha[second] += rng.uniform(STRENGTH_BOOST.0, STRENGTH_BOOST.1);
    }

    // The weak subject may land on a boosted one; the penalty then just
    // dampens the boost.
    let weak = rng.next_u64_below(SUBJECT_COUNT as u64) as usize;
    alpha[weak] *= rng.uniform(WEAKNESS_FACTOR.0, WEAKNESS_FACTOR.1);

    dirichlet(rng, &alpha)
}

/// Standard Dirichlet construction: independent Gamma(alpha_i, 1) draws
/// normalized by their sum. An exactly-zero sum yields uniform weights.
pub fn dirichlet(rng: &mut AtlasRng, alpha: &[f64; SUBJECT_COUNT]) -> [f64; SUBJECT_COUNT] {
    let mut draws = [0.0; SUBJECT_COUNT];
    for (draw, &a) in draws.iter_mut().zip(alpha.iter()) {
        *draw = rng.gamma(a);
    }
    let total: f64 = draws.iter().sum();
    if total == 0.0 {
        return [1.0 / SUBJECT_COUNT as f64; SUBJECT_COUNT];
    }
    draws.map(|d| d / total)
}
