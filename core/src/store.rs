//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database. Generators, import and
//! the stats path call store methods — they never execute SQL directly.

use crate::error::{AtlasError, AtlasResult};
use crate::student::{validate_score, NewStudent, StudentRecord};
use crate::subject::{Subject, TOTAL_MAX};
use crate::types::{Score, StudentId};
use rusqlite::{params, Connection};

/// Derived total, computed in every query and never stored.
const TOTAL_EXPR: &str = "(chinese + math + english + physics + chemistry + biology)";

const SELECT_COLUMNS: &str = "id, name, chinese, math, english, physics, chemistry, biology";

/// Listing/stats filter. `limit` caps ranked listings only; the stats
/// path always fetches without it.
#[derive(Debug, Clone)]
pub struct StudentFilter {
    /// Substring match on name; empty means no filter.
    pub keyword: String,
    pub min_total: Score,
    pub max_total: Score,
    pub limit: Option<usize>,
}

impl Default for StudentFilter {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            min_total: 0,
            max_total: TOTAL_MAX,
            limit: None,
        }
    }
}

impl StudentFilter {
    /// Clamp bounds into [0, TOTAL_MAX], swap them if inverted, and
    /// floor the limit at 1.
    pub fn normalized(&self) -> Self {
        let lo = self.min_total.clamp(0, TOTAL_MAX);
        let hi = self.max_total.clamp(0, TOTAL_MAX);
        Self {
            keyword: self.keyword.trim().to_string(),
            min_total: lo.min(hi),
            max_total: lo.max(hi),
            limit: self.limit.map(|l| l.max(1)),
        }
    }
}

pub struct ScoreStore {
    conn: Connection,
}

impl ScoreStore {
    /// Open (or create) the score database at `path`.
    pub fn open(path: &str) -> AtlasResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only works for real files; ignore failures elsewhere.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> AtlasResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> AtlasResult<()> {
        self.conn
            .execute_batch(include_str!("../migrations/001_students.sql"))?;
        Ok(())
    }

    // ── Writes ─────────────────────────────────────────────────

    pub fn insert_student(&self, student: &NewStudent) -> AtlasResult<StudentRecord> {
        student.validate()?;
        let id = Self::insert_row(&self.conn, student)?;
        self.student_by_id(id)
    }

    /// Insert a batch in one transaction.
    pub fn insert_students(&self, students: &[NewStudent]) -> AtlasResult<usize> {
        for student in students {
            student.validate()?;
        }
        let tx = self.conn.unchecked_transaction()?;
        for student in students {
            Self::insert_row(&tx, student)?;
        }
        tx.commit()?;
        Ok(students.len())
    }

    /// Delete everything, then insert the given batch, in one
    /// transaction.
    pub fn replace_population(&self, students: &[NewStudent]) -> AtlasResult<usize> {
        for student in students {
            student.validate()?;
        }
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM students", [])?;
        for student in students {
            Self::insert_row(&tx, student)?;
        }
        tx.commit()?;
        Ok(students.len())
    }

    /// Patch one subject score. Subjects arrive already validated into
    /// the closed enum, so the column name is safe to splice into SQL.
    pub fn update_subject(
        &self,
        id: StudentId,
        subject: Subject,
        score: Score,
    ) -> AtlasResult<StudentRecord> {
        validate_score(subject, score)?;
        let sql = format!("UPDATE students SET {} = ?1 WHERE id = ?2", subject.code());
        let affected = self.conn.execute(&sql, params![score, id])?;
        if affected == 0 {
            return Err(AtlasError::StudentNotFound { id });
        }
        self.student_by_id(id)
    }

    pub fn delete_student(&self, id: StudentId) -> AtlasResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(AtlasError::StudentNotFound { id });
        }
        Ok(())
    }

    pub fn clear(&self) -> AtlasResult<()> {
        self.conn.execute("DELETE FROM students", [])?;
        Ok(())
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn student_by_id(&self, id: StudentId) -> AtlasResult<StudentRecord> {
        let sql =
            format!("SELECT {SELECT_COLUMNS}, {TOTAL_EXPR} AS total FROM students WHERE id = ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        stmt.query_row(params![id], Self::row_to_student)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => AtlasError::StudentNotFound { id },
                other => AtlasError::Database(other),
            })
    }

    /// Fetch records matching `filter`, in ranking order.
    pub fn fetch_students(&self, filter: &StudentFilter) -> AtlasResult<Vec<StudentRecord>> {
        let f = filter.normalized();
        let pattern = format!("%{}%", f.keyword);
        let mut sql = format!(
            "SELECT {SELECT_COLUMNS}, {TOTAL_EXPR} AS total
             FROM students
             WHERE {TOTAL_EXPR} BETWEEN ?1 AND ?2 AND name LIKE ?3
             ORDER BY total DESC, chinese DESC, math DESC, english DESC, id ASC"
        );
        if let Some(limit) = f.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![f.min_total, f.max_total, pattern],
            Self::row_to_student,
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn student_count(&self) -> AtlasResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(1) FROM students", [], |row| row.get(0))?;
        Ok(count)
    }

    // ── Helpers ────────────────────────────────────────────────

    fn insert_row(conn: &Connection, student: &NewStudent) -> AtlasResult<StudentId> {
        conn.execute(
            "INSERT INTO students (name, chinese, math, english, physics, chemistry, biology)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                student.name.trim(),
                student.chinese,
                student.math,
                student.english,
                student.physics,
                student.chemistry,
                student.biology,
            ],
        )
        .map_err(|e| Self::map_constraint(e, &student.name))?;
        Ok(conn.last_insert_rowid())
    }

    /// Scores are validated before any insert reaches SQLite, so a
    /// constraint failure here can only be the UNIQUE name index.
    fn map_constraint(err: rusqlite::Error, name: &str) -> AtlasError {
        match err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                AtlasError::DuplicateName {
                    name: name.trim().to_string(),
                }
            }
            other => AtlasError::Database(other),
        }
    }

    fn row_to_student(row: &rusqlite::Row<'_>) -> rusqlite::Result<StudentRecord> {
        Ok(StudentRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            chinese: row.get(2)?,
            math: row.get(3)?,
            english: row.get(4)?,
            physics: row.get(5)?,
            chemistry: row.get(6)?,
            biology: row.get(7)?,
            total: row.get(8)?,
        })
    }
}
