//! Performance tiers: static configuration for the score generator.
//!
//! Each tier fixes the Gaussian parameters of a generated student's
//! target total, the clamp range for that total, and per-subject score
//! floors. Probabilities across the table sum to 1.

use crate::rng::AtlasRng;
use crate::subject::SUBJECT_COUNT;
use crate::types::Score;

#[derive(Debug, Clone)]
pub struct Tier {
    pub probability: f64,
    pub mean_total: f64,
    pub std_dev_total: f64,
    /// Inclusive clamp bounds for the sampled target total.
    pub total_range: (Score, Score),
    /// Per-subject floors, in canonical subject order.
    pub subject_minimums: [Score; SUBJECT_COUNT],
}

pub static TIERS: [Tier; 3] = [
    Tier {
        probability: 0.18,
        mean_total: 675.0,
        std_dev_total: 24.0,
        total_range: (620, 730),
        subject_minimums: [92, 90, 90, 58, 56, 56],
    },
    Tier {
        probability: 0.57,
        mean_total: 545.0,
        std_dev_total: 40.0,
        total_range: (470, 620),
        subject_minimums: [55, 52, 52, 32, 32, 30],
    },
    Tier {
        probability: 0.25,
        mean_total: 410.0,
        std_dev_total: 42.0,
        total_range: (300, 500),
        subject_minimums: [35, 30, 30, 18, 18, 18],
    },
];

/// Sample one tier by walking the cumulative probability mass.
/// Falls back to the last tier if floating-point accumulation leaves
/// the draw unmatched.
pub fn sample(rng: &mut AtlasRng) -> &'static Tier {
    let roll = rng.next_f64();
    let mut cumulative = 0.0;
    for tier in &TIERS {
        cumulative += tier.probability;
        if roll <= cumulative {
            return tier;
        }
    }
    &TIERS[TIERS.len() - 1]
}
