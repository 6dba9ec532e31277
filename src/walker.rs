//! Directory traversal: cleans every raw CSV under an input root into a
//! mirrored output tree.

use anyhow::{Context, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::cleaning::aggregate::combine_rows;
use crate::cleaning::header::Schema;
use crate::cleaning::row::{RowIndices, clean_row, is_complete};
use crate::error::{CleanError, Result};
use crate::output::write_cleaned;
use crate::parser::parse_table;
use crate::stats::{FileReport, RunStats};

/// Knobs controlling how failures are handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanOptions {
    /// Fail the file on a malformed grade and abort the run on the first
    /// failed file. When unset, such rows and files are logged and skipped.
    pub strict: bool,
}

/// Cleans one raw CSV file and writes the aggregated result to `output`.
///
/// Nothing is written when the input is empty or no rows survive filtering.
///
/// # Errors
///
/// Fails on unreadable input, a missing required column, an overflowing
/// enrollment total, a zero-weight aggregation group, or (in strict mode) a
/// malformed grade.
#[tracing::instrument(skip_all, fields(input = %input.display()))]
pub fn clean_file(input: &Path, output: &Path, options: &CleanOptions) -> Result<FileReport> {
    let bytes = fs::read(input)?;
    let mut report = FileReport::default();

    let Some(table) = parse_table(&bytes)? else {
        debug!("Input file is empty");
        return Ok(report);
    };

    let schema = Schema::resolve(&table.header)?;
    let indices = RowIndices::from(&schema);

    let mut cleaned = Vec::with_capacity(table.rows.len());
    for (line, raw) in table.rows.iter().enumerate() {
        report.rows_read += 1;

        if !is_complete(raw) {
            report.rows_incomplete += 1;
            continue;
        }

        if raw.len() != schema.raw_width {
            warn!(
                row = line + 1,
                cells = raw.len(),
                expected = schema.raw_width,
                "Skipping ragged row"
            );
            report.rows_ragged += 1;
            continue;
        }

        match clean_row(raw, &indices) {
            Ok(row) => cleaned.push(row),
            Err(CleanError::Grade { value }) if !options.strict => {
                warn!(row = line + 1, value = %value, "Skipping row with malformed grade");
                report.rows_malformed_grade += 1;
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        rows = report.rows_read,
        kept = cleaned.len(),
        incomplete = report.rows_incomplete,
        "Rows filtered"
    );

    if cleaned.is_empty() {
        return Ok(report);
    }

    let combined = combine_rows(&cleaned, &schema)?;
    if combined.is_empty() {
        return Ok(report);
    }

    write_cleaned(output, &schema.header, &combined)?;
    report.groups = combined.len();
    report.written = true;

    Ok(report)
}

/// Cleans every `.csv` file under `input_root`, writing results to the same
/// relative path under `output_root`.
///
/// Files are visited in file-name order. A failing file is logged and
/// counted; the walk continues unless `options.strict` is set.
///
/// # Errors
///
/// Returns an error if `input_root` is not a directory, or on the first
/// failed file in strict mode.
pub fn process_directory(
    input_root: &Path,
    output_root: &Path,
    options: &CleanOptions,
) -> anyhow::Result<RunStats> {
    if !input_root.is_dir() {
        bail!("input directory {} does not exist", input_root.display());
    }

    let mut stats = RunStats::new(
        &input_root.display().to_string(),
        &output_root.display().to_string(),
    );

    for entry in WalkDir::new(input_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if !options.strict => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
            Err(e) => return Err(e).context("walking input directory"),
        };

        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("csv")
        {
            continue;
        }

        let relative = path
            .strip_prefix(input_root)
            .with_context(|| format!("{} is outside {}", path.display(), input_root.display()))?;
        let output = output_root.join(relative);

        match clean_file(path, &output, options) {
            Ok(report) => {
                if report.written {
                    info!(
                        input = %path.display(),
                        output = %output.display(),
                        groups = report.groups,
                        "File cleaned"
                    );
                } else {
                    info!(input = %path.display(), "No rows left, skipping output");
                }
                stats.record(&report);
            }
            Err(e) => {
                error!(input = %path.display(), error = %e, "Failed to clean file");
                stats.record_failure();
                if options.strict {
                    return Err(e).with_context(|| format!("cleaning {}", path.display()));
                }
            }
        }
    }

    Ok(stats.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const HEADER: &str = "INSTRUCTOR,COURSE,TERM,ENROLLED/RESP RATE,AVG GRADE RECEIVED\n";

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_clean_file_combines_sections() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out").join("in.csv");
        write(
            &input,
            &format!(
                "{HEADER}\"Smith, Jane\",CS101,Fall 2023,50(80%),3.50 (N=40)\n\
                 \"Smith, Jane\",CS101,Fall 2023,30(90%),3.80 (N=27)\n"
            ),
        );

        let report = clean_file(&input, &output, &CleanOptions::default()).unwrap();

        assert!(report.written);
        assert_eq!(report.groups, 1);
        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(
            content,
            "INSTRUCTOR,COURSE,TERM,ENROLLED,RESP RATE,AVG GRADE RECEIVED\n\
             Jane Smith,CS101,Fall 2023,80,83.75,3.62\n"
        );
    }

    #[test]
    fn test_clean_file_incomplete_rows_produce_no_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        write(
            &input,
            &format!("{HEADER}\"Smith, Jane\",CS101,N/A,50(80%),3.50\nDoe,CS101,Fall,,3.1\n"),
        );

        let report = clean_file(&input, &output, &CleanOptions::default()).unwrap();

        assert!(!report.written);
        assert_eq!(report.rows_incomplete, 2);
        assert!(!output.exists());
    }

    #[test]
    fn test_clean_file_empty_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        write(&input, "");

        let report = clean_file(&input, &output, &CleanOptions::default()).unwrap();
        assert_eq!(report, FileReport::default());
        assert!(!output.exists());
    }

    #[test]
    fn test_clean_file_missing_column() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        write(&input, "INSTRUCTOR,COURSE,ENROLLED/RESP RATE,AVG GRADE RECEIVED\nA,B,1(1%),3.0\n");

        let err = clean_file(&input, &output, &CleanOptions::default()).unwrap_err();
        assert!(matches!(err, CleanError::MissingColumn(c) if c == "TERM"));
        assert!(!output.exists());
    }

    #[test]
    fn test_malformed_grade_lenient_vs_strict() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        write(
            &input,
            &format!("{HEADER}Doe,CS101,Fall,10(50%),A-\nDoe,CS101,Fall,10(50%),3.00\n"),
        );

        let report = clean_file(&input, &output, &CleanOptions::default()).unwrap();
        assert_eq!(report.rows_malformed_grade, 1);
        assert!(report.written);

        let strict = CleanOptions { strict: true };
        let err = clean_file(&input, &output, &strict).unwrap_err();
        assert!(matches!(err, CleanError::Grade { .. }));
    }

    #[test]
    fn test_ragged_row_skipped() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        write(
            &input,
            &format!("{HEADER}Doe,CS101,Fall,10(50%)\nDoe,CS101,Fall,10(50%),3.00\n"),
        );

        let report = clean_file(&input, &output, &CleanOptions::default()).unwrap();
        assert_eq!(report.rows_ragged, 1);
        assert_eq!(report.groups, 1);
    }

    #[test]
    fn test_clean_file_rounds_like_stored_value() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        write(
            &input,
            &format!("{HEADER}Doe,CS101,Fall,1(0.015%),3.00\nLee,CS101,Fall,1(72.285%),3.00\n"),
        );

        clean_file(&input, &output, &CleanOptions::default()).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[1], "Doe,CS101,Fall,1,0.01,3.0");
        assert_eq!(lines[2], "Lee,CS101,Fall,1,72.28,3.0");
    }

    #[test]
    fn test_clean_file_enrollment_overflow() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        write(
            &input,
            &format!(
                "{HEADER}A,CS101,Fall,9223372036854775807(50%),3.00\n\
                 A,CS101,Fall,9223372036854775807(50%),3.00\n"
            ),
        );

        let err = clean_file(&input, &output, &CleanOptions::default()).unwrap_err();
        assert!(matches!(err, CleanError::EnrollmentOverflow { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_process_directory_missing_root() {
        let dir = tempdir().unwrap();
        let result = process_directory(
            &dir.path().join("csv"),
            &dir.path().join("csv_cleaned"),
            &CleanOptions::default(),
        );
        assert!(result.is_err());
    }
}
