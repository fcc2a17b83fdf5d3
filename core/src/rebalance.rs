//! Integer score repair.
//!
//! Nudges a score vector one point at a time until it sums to a target,
//! keeping every element inside its bounds. The index to step is picked
//! at random so repeated adjustments spread across subjects instead of
//! piling onto one.

use crate::rng::AtlasRng;
use crate::subject::SUBJECT_COUNT;
use crate::types::Score;

/// Upper bound on repair iterations. Never reached for a sane
/// configuration; a stop here means the target was unreachable.
pub const REBALANCE_GUARD: u32 = 10_000;

/// Clamp a float into inclusive integer bounds, truncating toward zero.
pub fn clamp_score(value: f64, low: Score, high: Score) -> Score {
    value.max(low as f64).min(high as f64) as Score
}

/// Repair `scores` so it sums to `target_total` with every element in
/// `[mins[i], maxs[i]]`. Infeasible bounds degrade to the best partial
/// adjustment, which may miss the target.
pub fn rebalance(
    scores: [Score; SUBJECT_COUNT],
    target_total: Score,
    mins: &[Score; SUBJECT_COUNT],
    maxs: &[Score; SUBJECT_COUNT],
    rng: &mut AtlasRng,
) -> [Score; SUBJECT_COUNT] {
    let mut adjusted = [0; SUBJECT_COUNT];
    for i in 0..SUBJECT_COUNT {
        adjusted[i] = scores[i].max(mins[i]).min(maxs[i]);
    }

    let mut diff = target_total - adjusted.iter().sum::<Score>();
    let mut guard = 0;
    while diff != 0 && guard < REBALANCE_GUARD {
        let candidates: Vec<usize> = if diff > 0 {
            (0..SUBJECT_COUNT).filter(|&i| adjusted[i] < maxs[i]).collect()
        } else {
            (0..SUBJECT_COUNT).filter(|&i| adjusted[i] > mins[i]).collect()
        };
        if candidates.is_empty() {
            break;
        }
        let idx = candidates[rng.next_u64_below(candidates.len() as u64) as usize];
        if diff > 0 {
            adjusted[idx] += 1;
            diff -= 1;
        } else {
            adjusted[idx] -= 1;
            diff += 1;
        }
        guard += 1;
    }

    if diff != 0 {
        log::warn!(
            "rebalance stopped {diff} away from target {target_total}: bounds make it unreachable"
        );
    }

    adjusted
}
