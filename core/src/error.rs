use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown subject '{name}'")]
    UnknownSubject { name: String },

    #[error("{subject} score {value} outside 0-{max}")]
    ScoreOutOfRange {
        subject: &'static str,
        value: i64,
        max: i64,
    },

    #[error("Student name must not be empty")]
    EmptyName,

    #[error("Student name '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Student {id} not found")]
    StudentNotFound { id: i64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AtlasResult<T> = Result<T, AtlasError>;
