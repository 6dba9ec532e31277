//! Header normalization and per-file column resolution.

use crate::error::{CleanError, Result};

pub const ENROLLED_RESP_RATE: &str = "ENROLLED/RESP RATE";
pub const ENROLLED: &str = "ENROLLED";
pub const RESP_RATE: &str = "RESP RATE";
pub const INSTRUCTOR: &str = "INSTRUCTOR";
pub const AVG_GRADE_RECEIVED: &str = "AVG GRADE RECEIVED";
pub const COURSE: &str = "COURSE";
pub const TERM: &str = "TERM";

/// Removes embedded newlines and surrounding whitespace from a cell.
pub fn normalize_cell(value: &str) -> String {
    value.replace('\n', "").trim().to_string()
}

/// Normalizes every column name and splits the composite enrollment column
/// into adjacent `ENROLLED` and `RESP RATE` columns.
///
/// Returns the expanded header and the raw index of the composite column.
///
/// # Errors
///
/// Returns [`CleanError::MissingColumn`] if `ENROLLED/RESP RATE` is absent.
pub fn normalize_header(raw: &[String]) -> Result<(Vec<String>, usize)> {
    let mut header: Vec<String> = raw.iter().map(|c| normalize_cell(c)).collect();

    let composite = position(&header, ENROLLED_RESP_RATE)?;
    header[composite] = ENROLLED.to_string();
    header.insert(composite + 1, RESP_RATE.to_string());

    Ok((header, composite))
}

fn position(header: &[String], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| CleanError::MissingColumn(name.to_string()))
}

/// Position of a raw column once the composite cell at `composite` has been
/// split in two. Without a composite column nothing moves.
pub fn expanded_index(raw_index: usize, composite: Option<usize>) -> usize {
    match composite {
        Some(composite) if raw_index > composite => raw_index + 1,
        _ => raw_index,
    }
}

/// Column positions resolved once per file.
///
/// All indices refer to the raw header; [`Schema::expanded`] maps them into
/// the header produced by [`normalize_header`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Expanded header written to the output file.
    pub header: Vec<String>,
    /// Number of columns in the raw header.
    pub raw_width: usize,
    pub instructor: usize,
    pub enrolled_resp_rate: usize,
    pub avg_grade: usize,
    pub course: usize,
    pub term: usize,
}

impl Schema {
    /// Resolves every required column from a raw header row.
    pub fn resolve(raw: &[String]) -> Result<Self> {
        let (header, enrolled_resp_rate) = normalize_header(raw)?;
        // Look the remaining names up in the raw header so every index has the
        // same frame of reference.
        let stripped: Vec<String> = raw.iter().map(|c| normalize_cell(c)).collect();

        Ok(Schema {
            instructor: position(&stripped, INSTRUCTOR)?,
            avg_grade: position(&stripped, AVG_GRADE_RECEIVED)?,
            course: position(&stripped, COURSE)?,
            term: position(&stripped, TERM)?,
            raw_width: raw.len(),
            enrolled_resp_rate,
            header,
        })
    }

    /// Maps a raw column index to its position after the composite split.
    pub fn expanded(&self, raw_index: usize) -> usize {
        expanded_index(raw_index, Some(self.enrolled_resp_rate))
    }

    pub fn enrolled_index(&self) -> usize {
        self.enrolled_resp_rate
    }

    pub fn resp_rate_index(&self) -> usize {
        self.enrolled_resp_rate + 1
    }
}
