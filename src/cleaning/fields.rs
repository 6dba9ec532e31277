//! Parsers for the individual columns scraped from the evaluation portal.

use regex::Regex;
use std::sync::LazyLock;

use crate::cleaning::types::Cell;
use crate::error::{CleanError, Result};

static ENROLLED_RESP_RATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\((\d+\.?\d*)%\)").expect("Invalid enrolled/resp rate pattern")
});

/// Width of the section code the portal appends to every course name.
const COURSE_SUFFIX_LEN: usize = 6;

/// Marker the portal uses when no grade distribution was reported.
const GRADE_NOT_AVAILABLE: &str = "(N/A)";

/// Characters of the grade cell that hold the numeric average, e.g. `3.75`.
const GRADE_PREFIX_LEN: usize = 4;

/// Turns `"Last, First"` into `"First Last"`. Names without a comma are
/// returned unchanged.
pub fn clean_instructor_name(name: &str) -> String {
    match name.split_once(',') {
        Some((last, first)) => format!("{} {}", first.trim(), last.trim()),
        None => name.to_string(),
    }
}

/// Splits a composite `"85(72.5%)"` cell into enrolled count and response rate.
///
/// Cells that don't match fall back to the original text with a zero rate so
/// that one malformed cell doesn't sink the whole file.
pub fn split_enrolled_resp_rate(value: &str) -> (Cell, f64) {
    let parsed = ENROLLED_RESP_RATE_PATTERN.captures(value).and_then(|caps| {
        let enrolled = caps[1].parse::<i64>().ok()?;
        let rate = caps[2].parse::<f64>().ok()?;
        Some((Cell::Int(enrolled), rate))
    });

    parsed.unwrap_or_else(|| (Cell::Text(value.to_string()), 0.0))
}

/// Parses the average grade from cells like `"3.75 (N=40)"`.
///
/// `(N/A)` anywhere in the cell yields [`Cell::Empty`].
///
/// # Errors
///
/// Returns [`CleanError::Grade`] when the leading characters are not a finite
/// number.
pub fn clean_avg_grade_received(value: &str) -> Result<Cell> {
    if value.contains(GRADE_NOT_AVAILABLE) {
        return Ok(Cell::Empty);
    }

    let prefix: String = value.chars().take(GRADE_PREFIX_LEN).collect();
    match prefix.trim().parse::<f64>() {
        Ok(grade) if grade.is_finite() => Ok(Cell::Float(grade)),
        _ => Err(CleanError::Grade {
            value: value.to_string(),
        }),
    }
}

/// Drops the trailing section code from a course name.
pub fn clean_course_name(course: &str) -> String {
    let len = course.chars().count();
    if len > COURSE_SUFFIX_LEN {
        course.chars().take(len - COURSE_SUFFIX_LEN).collect()
    } else {
        course.to_string()
    }
}
