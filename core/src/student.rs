//! Student score records and the canonical ranking order.

use crate::error::{AtlasError, AtlasResult};
use crate::subject::{Subject, SUBJECT_COUNT};
use crate::types::{Score, StudentId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A persisted record. `total` is always derived from the six subject
/// scores — the store computes it on read and never writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub chinese: Score,
    pub math: Score,
    pub english: Score,
    pub physics: Score,
    pub chemistry: Score,
    pub biology: Score,
    pub total: Score,
}

impl StudentRecord {
    pub fn score(&self, subject: Subject) -> Score {
        match subject {
            Subject::Chinese => self.chinese,
            Subject::Math => self.math,
            Subject::English => self.english,
            Subject::Physics => self.physics,
            Subject::Chemistry => self.chemistry,
            Subject::Biology => self.biology,
        }
    }

    /// Scores in canonical subject order.
    pub fn scores(&self) -> [Score; SUBJECT_COUNT] {
        Subject::ALL.map(|s| self.score(s))
    }
}

/// A record proposed for insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub chinese: Score,
    pub math: Score,
    pub english: Score,
    pub physics: Score,
    pub chemistry: Score,
    pub biology: Score,
}

impl NewStudent {
    pub fn from_scores(name: String, scores: [Score; SUBJECT_COUNT]) -> Self {
        Self {
            name,
            chinese: scores[0],
            math: scores[1],
            english: scores[2],
            physics: scores[3],
            chemistry: scores[4],
            biology: scores[5],
        }
    }

    pub fn score(&self, subject: Subject) -> Score {
        match subject {
            Subject::Chinese => self.chinese,
            Subject::Math => self.math,
            Subject::English => self.english,
            Subject::Physics => self.physics,
            Subject::Chemistry => self.chemistry,
            Subject::Biology => self.biology,
        }
    }

    pub fn total(&self) -> Score {
        Subject::ALL.iter().map(|&s| self.score(s)).sum()
    }

    /// Boundary validation: non-empty trimmed name, every score within
    /// its subject's range.
    pub fn validate(&self) -> AtlasResult<()> {
        if self.name.trim().is_empty() {
            return Err(AtlasError::EmptyName);
        }
        for subject in Subject::ALL {
            validate_score(subject, self.score(subject))?;
        }
        Ok(())
    }
}

/// Check one score against its subject's inclusive range.
pub fn validate_score(subject: Subject, value: Score) -> AtlasResult<Score> {
    if value < 0 || value > subject.max_score() {
        return Err(AtlasError::ScoreOutOfRange {
            subject: subject.label(),
            value,
            max: subject.max_score(),
        });
    }
    Ok(value)
}

/// System-wide ranking order: total desc, then chinese, math, english
/// desc, then id asc. Stable and deterministic for any record set.
pub fn rank_ordering(a: &StudentRecord, b: &StudentRecord) -> Ordering {
    b.total
        .cmp(&a.total)
        .then_with(|| b.chinese.cmp(&a.chinese))
        .then_with(|| b.math.cmp(&a.math))
        .then_with(|| b.english.cmp(&a.english))
        .then_with(|| a.id.cmp(&b.id))
}
