//! Store CRUD and filter-contract tests.

use atlas_core::error::AtlasError;
use atlas_core::store::{ScoreStore, StudentFilter};
use atlas_core::student::NewStudent;
use atlas_core::subject::Subject;
use atlas_core::types::Score;

fn open_store() -> ScoreStore {
    let store = ScoreStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

fn student(name: &str, scores: [Score; 6]) -> NewStudent {
    NewStudent::from_scores(name.to_string(), scores)
}

/// Totals 700 / 500 / 300 under distinct names.
fn seeded_store() -> ScoreStore {
    let store = open_store();
    store
        .insert_students(&[
            student("王子安", [150, 150, 150, 90, 80, 80]),
            student("李雨晨", [100, 100, 100, 70, 70, 60]),
            student("张文博", [60, 60, 60, 40, 40, 40]),
        ])
        .expect("seed inserts");
    store
}

#[test]
fn insert_computes_total_and_assigns_id() {
    let store = open_store();
    let inserted = store
        .insert_student(&student("王子安", [150, 140, 130, 90, 80, 70]))
        .expect("insert");
    assert!(inserted.id > 0);
    assert_eq!(inserted.total, 660);

    let fetched = store.student_by_id(inserted.id).expect("fetch by id");
    assert_eq!(fetched, inserted);
}

#[test]
fn duplicate_name_is_rejected() {
    let store = seeded_store();
    let err = store
        .insert_student(&student("王子安", [1, 1, 1, 1, 1, 1]))
        .unwrap_err();
    assert!(matches!(err, AtlasError::DuplicateName { .. }), "{err}");
    assert_eq!(store.student_count().expect("count"), 3);
}

#[test]
fn invalid_scores_never_reach_the_database() {
    let store = open_store();
    let err = store
        .insert_student(&student("测试生", [151, 0, 0, 0, 0, 0]))
        .unwrap_err();
    assert!(matches!(err, AtlasError::ScoreOutOfRange { .. }), "{err}");

    let err = store.insert_student(&student("  ", [1, 1, 1, 1, 1, 1])).unwrap_err();
    assert!(matches!(err, AtlasError::EmptyName), "{err}");
}

#[test]
fn update_subject_patches_one_score() {
    let store = seeded_store();
    let before = store
        .fetch_students(&StudentFilter::default())
        .expect("fetch")[0]
        .clone();

    let subject = Subject::parse("物理").expect("label parses");
    let after = store
        .update_subject(before.id, subject, 100)
        .expect("patch");
    assert_eq!(after.physics, 100);
    assert_eq!(after.total, before.total - before.physics + 100);

    let err = store.update_subject(before.id, subject, 101).unwrap_err();
    assert!(matches!(err, AtlasError::ScoreOutOfRange { .. }), "{err}");

    let err = store.update_subject(9999, subject, 90).unwrap_err();
    assert!(matches!(err, AtlasError::StudentNotFound { .. }), "{err}");
}

#[test]
fn delete_student_is_idempotent_only_once() {
    let store = seeded_store();
    let victim = store
        .fetch_students(&StudentFilter::default())
        .expect("fetch")[0]
        .clone();

    store.delete_student(victim.id).expect("first delete");
    assert_eq!(store.student_count().expect("count"), 2);

    let err = store.delete_student(victim.id).unwrap_err();
    assert!(matches!(err, AtlasError::StudentNotFound { .. }), "{err}");
}

#[test]
fn fetch_returns_records_in_ranking_order() {
    let store = open_store();
    store
        .insert_students(&[
            student("相同一", [100, 100, 100, 50, 50, 50]),
            student("相同二", [100, 100, 100, 50, 50, 50]),
            student("英语低", [100, 100, 99, 51, 50, 50]),
            student("高分生", [150, 150, 150, 90, 80, 80]),
        ])
        .expect("inserts");

    let names: Vec<String> = store
        .fetch_students(&StudentFilter::default())
        .expect("fetch")
        .into_iter()
        .map(|s| s.name)
        .collect();
    // Equal 450 totals: english breaks the third place, id the tie.
    assert_eq!(names, vec!["高分生", "相同一", "相同二", "英语低"]);
}

#[test]
fn keyword_filters_by_name_substring() {
    let store = seeded_store();
    let filter = StudentFilter {
        keyword: "雨".to_string(),
        ..StudentFilter::default()
    };
    let matched = store.fetch_students(&filter).expect("fetch");
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "李雨晨");
}

#[test]
fn total_bounds_are_inclusive_and_swap_when_inverted() {
    let store = seeded_store();

    let filter = StudentFilter {
        min_total: 600,
        max_total: 750,
        ..StudentFilter::default()
    };
    let matched = store.fetch_students(&filter).expect("fetch");
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].total, 700);

    // Inverted bounds behave identically.
    let inverted = StudentFilter {
        min_total: 750,
        max_total: 600,
        ..StudentFilter::default()
    };
    assert_eq!(store.fetch_students(&inverted).expect("fetch").len(), 1);

    // Inclusive on both edges.
    let exact = StudentFilter {
        min_total: 300,
        max_total: 500,
        ..StudentFilter::default()
    };
    assert_eq!(store.fetch_students(&exact).expect("fetch").len(), 2);
}

#[test]
fn limit_caps_the_listing_and_floors_at_one() {
    let store = seeded_store();

    let capped = StudentFilter {
        limit: Some(2),
        ..StudentFilter::default()
    };
    assert_eq!(store.fetch_students(&capped).expect("fetch").len(), 2);

    let floored = StudentFilter {
        limit: Some(0),
        ..StudentFilter::default()
    };
    assert_eq!(store.fetch_students(&floored).expect("fetch").len(), 1);
}
