//! The six exam subjects and their score ceilings.
//!
//! A closed enumeration: external subject strings (patch requests,
//! imports) are validated into it at the boundary and invalid names
//! fail with `AtlasError::UnknownSubject`.

use crate::error::{AtlasError, AtlasResult};
use crate::types::Score;
use serde::{Deserialize, Serialize};

pub const SUBJECT_COUNT: usize = 6;

/// Maximum achievable total across all six subjects.
pub const TOTAL_MAX: Score = 750;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Chinese,
    Math,
    English,
    Physics,
    Chemistry,
    Biology,
}

impl Subject {
    /// Canonical subject order. Ranking tie-breaks and the correlation
    /// matrix iterate in this order; it never changes.
    pub const ALL: [Subject; SUBJECT_COUNT] = [
        Subject::Chinese,
        Subject::Math,
        Subject::English,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
    ];

    /// Stable wire identifier, doubles as the store column name.
    pub fn code(self) -> &'static str {
        match self {
            Self::Chinese => "chinese",
            Self::Math => "math",
            Self::English => "english",
            Self::Physics => "physics",
            Self::Chemistry => "chemistry",
            Self::Biology => "biology",
        }
    }

    /// Human-readable display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Chinese => "语文",
            Self::Math => "数学",
            Self::English => "英语",
            Self::Physics => "物理",
            Self::Chemistry => "化学",
            Self::Biology => "生物",
        }
    }

    pub fn max_score(self) -> Score {
        match self {
            Self::Chinese | Self::Math | Self::English => 150,
            Self::Physics | Self::Chemistry | Self::Biology => 100,
        }
    }

    /// Position in the canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Per-subject maximums in canonical order.
    pub fn maximums() -> [Score; SUBJECT_COUNT] {
        Self::ALL.map(|s| s.max_score())
    }

    /// Accepts a wire code ("math") or a display label ("数学").
    pub fn parse(value: &str) -> AtlasResult<Subject> {
        let v = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.code() == v || s.label() == v)
            .ok_or_else(|| AtlasError::UnknownSubject {
                name: value.to_string(),
            })
    }
}
