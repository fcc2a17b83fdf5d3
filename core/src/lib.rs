//! Score Atlas core: synthetic exam-score generation and analytics.
//!
//! Generation produces plausible six-subject score records: a sampled
//! performance tier fixes a target total, Dirichlet-style weights split
//! it across subjects, and a randomized repair pass pins the sum while
//! respecting per-subject bounds. The stats engine aggregates any
//! filtered record set into a descriptive report, including the full
//! pairwise Pearson correlation matrix.

pub mod error;
pub mod export;
pub mod generator;
pub mod names;
pub mod rebalance;
pub mod rng;
pub mod stats;
pub mod store;
pub mod student;
pub mod subject;
pub mod tier;
pub mod types;
pub mod weights;
