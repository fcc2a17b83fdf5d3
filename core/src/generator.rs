//! Student record generation.
//!
//! Pipeline per record: sample a tier, draw a target total, split it
//! across subjects with Dirichlet-style weights, repair to the exact
//! target, jitter each subject, repair again. The two-pass noise +
//! repair keeps the organic per-subject scatter without drifting the
//! total off its target.

use crate::error::AtlasResult;
use crate::names::NameGenerator;
use crate::rebalance::{clamp_score, rebalance};
use crate::rng::AtlasRng;
use crate::store::ScoreStore;
use crate::student::NewStudent;
use crate::subject::{Subject, SUBJECT_COUNT};
use crate::types::Score;
use crate::{tier, weights};

/// Per-subject noise injected after the initial allocation, inclusive.
const NOISE_SPAN: i64 = 3;

/// Generate one complete record for `name`.
pub fn generate_record(name: &str, rng: &mut AtlasRng) -> NewStudent {
    let tier = tier::sample(rng);
    let (low, high) = tier.total_range;
    let target_total = clamp_score(rng.gauss(tier.mean_total, tier.std_dev_total), low, high);

    let mins = &tier.subject_minimums;
    let maxs = Subject::maximums();

    let w = weights::allocate(rng);
    let mut scores = [0; SUBJECT_COUNT];
    for i in 0..SUBJECT_COUNT {
        scores[i] = (target_total as f64 * w[i]) as Score;
    }
    let scores = rebalance(scores, target_total, mins, &maxs, rng);

    let mut noisy = [0; SUBJECT_COUNT];
    for i in 0..SUBJECT_COUNT {
        let jittered = scores[i] + rng.int_between(-NOISE_SPAN, NOISE_SPAN);
        noisy[i] = jittered.max(mins[i]).min(maxs[i]);
    }
    let final_scores = rebalance(noisy, target_total, mins, &maxs, rng);

    NewStudent::from_scores(name.to_string(), final_scores)
}

/// Generate `count` records with distinct synthetic names.
pub fn generate_population(count: usize, rng: &mut AtlasRng) -> Vec<NewStudent> {
    NameGenerator::generate_unique(count, rng)
        .into_iter()
        .map(|name| generate_record(&name, rng))
        .collect()
}

/// Replace the stored population with `count` freshly generated
/// students, in one transaction. Returns the number inserted.
pub fn reseed(store: &ScoreStore, count: usize, rng: &mut AtlasRng) -> AtlasResult<usize> {
    let students = generate_population(count, rng);
    let inserted = store.replace_population(&students)?;
    log::info!("reseeded population with {inserted} students");
    Ok(inserted)
}
