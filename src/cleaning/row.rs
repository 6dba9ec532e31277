//! Row filtering and per-cell cleaning.

use crate::cleaning::fields::{
    clean_avg_grade_received, clean_course_name, clean_instructor_name, split_enrolled_resp_rate,
};
use crate::cleaning::header::{Schema, expanded_index, normalize_cell};
use crate::cleaning::types::{Cell, Row};
use crate::error::Result;

/// Literal the portal writes into cells with no data.
const NOT_AVAILABLE: &str = "N/A";

/// Raw-header positions of the columns the row cleaner rewrites.
///
/// `None` skips the corresponding transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowIndices {
    pub instructor: Option<usize>,
    pub enrolled_resp_rate: Option<usize>,
    pub avg_grade: Option<usize>,
    pub course: Option<usize>,
}

impl From<&Schema> for RowIndices {
    fn from(schema: &Schema) -> Self {
        RowIndices {
            instructor: Some(schema.instructor),
            enrolled_resp_rate: Some(schema.enrolled_resp_rate),
            avg_grade: Some(schema.avg_grade),
            course: Some(schema.course),
        }
    }
}

/// Returns `false` for rows with an empty or `N/A` cell.
pub fn is_complete(raw: &[String]) -> bool {
    raw.iter().all(|cell| {
        let cell = normalize_cell(cell);
        !cell.is_empty() && cell != NOT_AVAILABLE
    })
}

/// Cleans one raw row into typed cells aligned with the expanded header.
///
/// # Errors
///
/// Propagates [`crate::error::CleanError::Grade`] from the grade column.
pub fn clean_row(raw: &[String], indices: &RowIndices) -> Result<Row> {
    let mut row: Row = raw.iter().map(|c| Cell::Text(normalize_cell(c))).collect();

    if let Some(i) = indices.instructor {
        if let Some(Cell::Text(name)) = row.get_mut(i) {
            *name = clean_instructor_name(name);
        }
    }

    if let Some(i) = indices.enrolled_resp_rate {
        if let Some(Cell::Text(value)) = row.get(i) {
            let (enrolled, rate) = split_enrolled_resp_rate(value);
            row[i] = enrolled;
            row.insert(i + 1, Cell::Float(rate));
        }
    }

    if let Some(i) = indices.avg_grade.map(|i| expanded_index(i, indices.enrolled_resp_rate)) {
        if let Some(Cell::Text(value)) = row.get(i) {
            let grade = clean_avg_grade_received(value)?;
            row[i] = grade;
        }
    }

    if let Some(i) = indices.course.map(|i| expanded_index(i, indices.enrolled_resp_rate)) {
        if let Some(Cell::Text(course)) = row.get_mut(i) {
            *course = clean_course_name(course);
        }
    }

    Ok(row)
}
