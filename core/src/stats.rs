//! Aggregate statistics over a set of student records.
//!
//! Reports are derived, ephemeral values: recomputed per query, never
//! persisted. Serialized field names are the stable contract consumed
//! downstream. The empty record set is a defined result, not an error.

use crate::student::{rank_ordering, StudentRecord};
use crate::subject::{Subject, SUBJECT_COUNT, TOTAL_MAX};
use crate::types::Score;
use serde::Serialize;
use std::collections::BTreeMap;

/// Total at or above which a record counts toward the excellent rate.
pub const EXCELLENT_TOTAL: Score = 600;
/// Total at or above which a record counts toward the qualified rate.
pub const QUALIFIED_TOTAL: Score = 450;

const HISTOGRAM_STEP: Score = 25;
const TOP_N: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct SubjectAverage {
    pub code: &'static str,
    pub label: &'static str,
    pub avg: f64,
    pub max: Score,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentCount {
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    pub label: String,
    pub left: Score,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub math: Score,
    pub english: Score,
    pub total: Score,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrelationCell {
    pub x: &'static str,
    pub y: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub count: usize,
    pub avg_total: f64,
    pub max_total: Score,
    pub min_total: Score,
    pub excellent_rate: f64,
    pub qualified_rate: f64,
    pub subject_averages: Vec<SubjectAverage>,
    pub segments: Vec<SegmentCount>,
    pub histogram: Vec<HistogramBin>,
    pub top10: Vec<StudentRecord>,
    pub scatter: Vec<ScatterPoint>,
    pub subject_series: BTreeMap<&'static str, Vec<Score>>,
    pub correlations: Vec<CorrelationCell>,
}

impl StatsReport {
    /// The defined result for an empty record set.
    pub fn empty() -> Self {
        Self {
            count: 0,
            avg_total: 0.0,
            max_total: 0,
            min_total: 0,
            excellent_rate: 0.0,
            qualified_rate: 0.0,
            subject_averages: Vec::new(),
            segments: Vec::new(),
            histogram: Vec::new(),
            top10: Vec::new(),
            scatter: Vec::new(),
            subject_series: BTreeMap::new(),
            correlations: Vec::new(),
        }
    }
}

/// Compute the full report over `records`. Input order is irrelevant;
/// every ranked collection is re-sorted by the canonical ordering.
pub fn compute(records: &[StudentRecord]) -> StatsReport {
    if records.is_empty() {
        return StatsReport::empty();
    }

    let mut ranked = records.to_vec();
    ranked.sort_by(rank_ordering);

    let count = ranked.len();
    let totals: Vec<Score> = ranked.iter().map(|s| s.total).collect();
    let max_total = totals.iter().copied().max().unwrap_or(0);
    let min_total = totals.iter().copied().min().unwrap_or(0);

    let mut series: [Vec<Score>; SUBJECT_COUNT] =
        std::array::from_fn(|_| Vec::with_capacity(count));
    for s in &ranked {
        for subject in Subject::ALL {
            series[subject.index()].push(s.score(subject));
        }
    }

    let subject_averages = Subject::ALL
        .iter()
        .map(|&subject| SubjectAverage {
            code: subject.code(),
            label: subject.label(),
            avg: round2(mean(&series[subject.index()])),
            max: subject.max_score(),
        })
        .collect();

    let excellent = totals.iter().filter(|&&t| t >= EXCELLENT_TOTAL).count();
    let qualified = totals.iter().filter(|&&t| t >= QUALIFIED_TOTAL).count();

    let scatter = ranked
        .iter()
        .map(|s| ScatterPoint {
            name: s.name.clone(),
            math: s.math,
            english: s.english,
            total: s.total,
        })
        .collect();

    let subject_series: BTreeMap<&'static str, Vec<Score>> = Subject::ALL
        .iter()
        .map(|&s| (s.label(), series[s.index()].clone()))
        .collect();

    let float_series: Vec<Vec<f64>> = series
        .iter()
        .map(|v| v.iter().map(|&x| x as f64).collect())
        .collect();
    let mut correlations = Vec::with_capacity(SUBJECT_COUNT * SUBJECT_COUNT);
    for x in Subject::ALL {
        for y in Subject::ALL {
            correlations.push(CorrelationCell {
                x: x.label(),
                y: y.label(),
                value: pearson(&float_series[x.index()], &float_series[y.index()]),
            });
        }
    }

    StatsReport {
        count,
        avg_total: round2(mean(&totals)),
        max_total,
        min_total,
        excellent_rate: round2(excellent as f64 * 100.0 / count as f64),
        qualified_rate: round2(qualified as f64 * 100.0 / count as f64),
        subject_averages,
        segments: segment_counts(&totals),
        histogram: histogram(&totals, min_total, max_total),
        top10: ranked.iter().take(TOP_N).cloned().collect(),
        scatter,
        subject_series,
        correlations,
    }
}

/// The five fixed population segments by total score.
fn segment_counts(totals: &[Score]) -> Vec<SegmentCount> {
    let between = |lo: Score, hi: Score| totals.iter().filter(|&&t| t >= lo && t <= hi).count();
    vec![
        SegmentCount {
            label: "350以下",
            count: totals.iter().filter(|&&t| t < 350).count(),
        },
        SegmentCount {
            label: "350-449",
            count: between(350, 449),
        },
        SegmentCount {
            label: "450-549",
            count: between(450, 549),
        },
        SegmentCount {
            label: "550-649",
            count: between(550, 649),
        },
        SegmentCount {
            label: "650及以上",
            count: totals.iter().filter(|&&t| t >= 650).count(),
        },
    ]
}

/// Fixed-width bins over the observed total range. Every bin is
/// half-open except the last, which includes its right edge so the
/// maximum total is never dropped.
fn histogram(totals: &[Score], min_total: Score, max_total: Score) -> Vec<HistogramBin> {
    let start = ((min_total / HISTOGRAM_STEP) * HISTOGRAM_STEP).max(0);
    let end = (((max_total / HISTOGRAM_STEP) + 2) * HISTOGRAM_STEP).min(TOTAL_MAX + HISTOGRAM_STEP);

    let mut bins = Vec::new();
    let mut left = start;
    while left < end {
        let right = left + HISTOGRAM_STEP;
        let count = if right >= end {
            totals.iter().filter(|&&t| t >= left && t <= right).count()
        } else {
            totals.iter().filter(|&&t| t >= left && t < right).count()
        };
        bins.push(HistogramBin {
            label: format!("{}-{}", left, right - 1),
            left,
            count,
        });
        left = right;
    }
    bins
}

/// Pearson product-moment correlation, rounded to 4 decimals.
/// Returns 0.0 for fewer than two points or a zero-variance series.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 {
        return 0.0;
    }
    let n = xs.len() as f64;
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;
    let num: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    let den_x = xs.iter().map(|x| (x - mx).powi(2)).sum::<f64>().sqrt();
    let den_y = ys.iter().map(|y| (y - my).powi(2)).sum::<f64>().sqrt();
    if den_x == 0.0 || den_y == 0.0 {
        return 0.0;
    }
    round4(num / (den_x * den_y))
}

fn mean(values: &[Score]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<Score>() as f64 / values.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
