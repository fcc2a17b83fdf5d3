//! CSV / JSON import and export of the student table.

use crate::error::{AtlasError, AtlasResult};
use crate::store::ScoreStore;
use crate::student::{NewStudent, StudentRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const CSV_HEADER: [&str; 9] = [
    "排名", "姓名", "语文", "数学", "英语", "物理", "化学", "生物", "总分",
];

/// Ranked CSV export. Callers pass records already in ranking order;
/// ranks are 1-based row numbers.
pub fn to_csv(records: &[StudentRecord]) -> AtlasResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for (idx, s) in records.iter().enumerate() {
        writer.write_record([
            (idx + 1).to_string(),
            s.name.clone(),
            s.chinese.to_string(),
            s.math.to_string(),
            s.english.to_string(),
            s.physics.to_string(),
            s.chemistry.to_string(),
            s.biology.to_string(),
            s.total.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AtlasError::Other(anyhow::anyhow!("csv writer flush: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AtlasError::Other(e.into()))
}

#[derive(Debug, Serialize)]
struct ExportPayload<'a> {
    students: &'a [StudentRecord],
    count: usize,
}

pub fn to_json(records: &[StudentRecord]) -> AtlasResult<String> {
    let payload = ExportPayload {
        students: records,
        count: records.len(),
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// JSON import payload: `{ "replace": true, "students": [...] }`.
#[derive(Debug, Deserialize)]
pub struct ImportFile {
    #[serde(default = "default_replace")]
    pub replace: bool,
    pub students: Vec<NewStudent>,
}

fn default_replace() -> bool {
    true
}

impl ImportFile {
    pub fn parse(json: &str) -> AtlasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Validate and apply an imported batch in one transaction. Duplicate
/// names inside the payload are rejected before touching the store.
pub fn import_students(
    store: &ScoreStore,
    students: &[NewStudent],
    replace: bool,
) -> AtlasResult<usize> {
    let mut seen = HashSet::new();
    for student in students {
        student.validate()?;
        if !seen.insert(student.name.trim().to_string()) {
            return Err(AtlasError::DuplicateName {
                name: student.name.trim().to_string(),
            });
        }
    }
    if replace {
        store.replace_population(students)
    } else {
        store.insert_students(students)
    }
}
