//! Stats engine contract tests.

use atlas_core::stats;
use atlas_core::student::{rank_ordering, StudentRecord};
use atlas_core::types::Score;

fn record(id: i64, name: &str, scores: [Score; 6]) -> StudentRecord {
    StudentRecord {
        id,
        name: name.to_string(),
        chinese: scores[0],
        math: scores[1],
        english: scores[2],
        physics: scores[3],
        chemistry: scores[4],
        biology: scores[5],
        total: scores.iter().sum(),
    }
}

/// Three records with totals 700 / 500 / 300.
fn three_band_population() -> Vec<StudentRecord> {
    vec![
        record(1, "甲", [150, 150, 150, 90, 80, 80]),
        record(2, "乙", [100, 100, 100, 70, 70, 60]),
        record(3, "丙", [60, 60, 60, 40, 40, 40]),
    ]
}

#[test]
fn empty_input_yields_the_defined_zero_report() {
    let report = stats::compute(&[]);
    assert_eq!(report.count, 0);
    assert_eq!(report.avg_total, 0.0);
    assert_eq!(report.max_total, 0);
    assert_eq!(report.min_total, 0);
    assert_eq!(report.excellent_rate, 0.0);
    assert_eq!(report.qualified_rate, 0.0);
    assert!(report.subject_averages.is_empty());
    assert!(report.segments.is_empty());
    assert!(report.histogram.is_empty());
    assert!(report.top10.is_empty());
    assert!(report.scatter.is_empty());
    assert!(report.subject_series.is_empty());
    assert!(report.correlations.is_empty());
}

#[test]
fn three_band_population_matches_expected_aggregates() {
    let report = stats::compute(&three_band_population());

    assert_eq!(report.count, 3);
    assert_eq!(report.avg_total, 500.0);
    assert_eq!(report.max_total, 700);
    assert_eq!(report.min_total, 300);
    assert_eq!(report.excellent_rate, 33.33);
    assert_eq!(report.qualified_rate, 66.67);

    let by_label: Vec<(&str, usize)> = report
        .segments
        .iter()
        .map(|s| (s.label, s.count))
        .collect();
    assert_eq!(
        by_label,
        vec![
            ("350以下", 1),
            ("350-449", 0),
            ("450-549", 1),
            ("550-649", 0),
            ("650及以上", 1),
        ]
    );

    // 语文 average: (150 + 100 + 60) / 3
    let chinese = &report.subject_averages[0];
    assert_eq!(chinese.code, "chinese");
    assert_eq!(chinese.avg, 103.33);
    assert_eq!(chinese.max, 150);
}

#[test]
fn histogram_bins_partition_the_record_set() {
    let population = three_band_population();
    let report = stats::compute(&population);

    // Totals 300..=700: bins start at 300 and end at min(775, 750).
    let first = report.histogram.first().expect("no bins");
    assert_eq!(first.left, 300);
    assert_eq!(first.label, "300-324");

    let binned: usize = report.histogram.iter().map(|b| b.count).sum();
    assert_eq!(binned, report.count, "histogram drops or double-counts");

    let segmented: usize = report.segments.iter().map(|s| s.count).sum();
    assert_eq!(segmented, report.count, "segments drop or double-count");
}

#[test]
fn histogram_keeps_the_maximum_total_in_the_last_bin() {
    // A single 750 total sits exactly on the final bin's right edge.
    let report = stats::compute(&[record(1, "满分", [150, 150, 150, 100, 100, 100])]);
    let binned: usize = report.histogram.iter().map(|b| b.count).sum();
    assert_eq!(binned, 1);
}

#[test]
fn top10_is_capped_and_ranked() {
    let mut population = Vec::new();
    for i in 0..15 {
        population.push(record(
            i + 1,
            &format!("s{i}"),
            [100, 90 + i, 80, 60, 60, 50],
        ));
    }
    let report = stats::compute(&population);

    assert_eq!(report.top10.len(), 10);
    for pair in report.top10.windows(2) {
        assert_ne!(
            rank_ordering(&pair[0], &pair[1]),
            std::cmp::Ordering::Greater,
            "top10 out of ranking order"
        );
    }
    // Scatter covers the full set, not just the top 10.
    assert_eq!(report.scatter.len(), 15);
}

#[test]
fn ties_resolve_subject_by_subject_then_by_id() {
    let population = vec![
        record(5, "a", [100, 100, 100, 50, 50, 50]),
        record(2, "b", [100, 100, 100, 50, 50, 50]),
        record(1, "c", [100, 100, 99, 51, 50, 50]),
    ];
    let report = stats::compute(&population);
    let ids: Vec<i64> = report.top10.iter().map(|s| s.id).collect();
    // Equal totals; c loses on english; a vs b falls through to id.
    assert_eq!(ids, vec![2, 5, 1]);
}

#[test]
fn correlation_matrix_covers_all_ordered_pairs() {
    let population = three_band_population();
    let report = stats::compute(&population);

    assert_eq!(report.correlations.len(), 36);

    for cell in &report.correlations {
        if cell.x == cell.y {
            assert_eq!(cell.value, 1.0, "self-correlation for {}", cell.x);
        }
        let mirrored = report
            .correlations
            .iter()
            .find(|c| c.x == cell.y && c.y == cell.x)
            .expect("missing mirrored cell");
        assert_eq!(cell.value, mirrored.value, "asymmetry at {}×{}", cell.x, cell.y);
    }
}

#[test]
fn constant_series_correlates_to_zero_by_convention() {
    // Physics is constant across the set; all its pairs, including the
    // self-pair, are defined as 0.
    let population = vec![
        record(1, "a", [100, 90, 80, 70, 60, 50]),
        record(2, "b", [120, 95, 85, 70, 65, 55]),
        record(3, "c", [90, 80, 70, 70, 55, 45]),
    ];
    let report = stats::compute(&population);
    for cell in &report.correlations {
        if cell.x == "物理" || cell.y == "物理" {
            assert_eq!(cell.value, 0.0, "zero-variance pair {}×{}", cell.x, cell.y);
        }
    }
}

#[test]
fn subject_series_carry_the_full_population() {
    let report = stats::compute(&three_band_population());
    assert_eq!(report.subject_series.len(), 6);
    for (label, series) in &report.subject_series {
        assert_eq!(series.len(), 3, "series for {label} is incomplete");
    }
}
