use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-file counters produced by [`crate::walker::clean_file`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub rows_read: usize,
    pub rows_incomplete: usize,
    pub rows_ragged: usize,
    pub rows_malformed_grade: usize,
    pub groups: usize,
    /// `false` when the file had no rows left to write.
    pub written: bool,
}

/// Summary of one cleaning run over a directory tree.
#[derive(Debug, Serialize)]
pub struct RunStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub input_dir: String,
    pub output_dir: String,

    // files
    pub files_seen: usize,
    pub files_written: usize,
    pub files_empty: usize,
    pub files_failed: usize,

    // rows
    pub rows_read: usize,
    pub rows_incomplete: usize,
    pub rows_ragged: usize,
    pub rows_malformed_grade: usize,
    pub groups_written: usize,
}

impl RunStats {
    pub fn new(input_dir: &str, output_dir: &str) -> Self {
        RunStats {
            started_at: Utc::now(),
            finished_at: None,
            input_dir: input_dir.to_string(),
            output_dir: output_dir.to_string(),
            files_seen: 0,
            files_written: 0,
            files_empty: 0,
            files_failed: 0,
            rows_read: 0,
            rows_incomplete: 0,
            rows_ragged: 0,
            rows_malformed_grade: 0,
            groups_written: 0,
        }
    }

    /// Folds one file's counters into the run totals.
    pub fn record(&mut self, report: &FileReport) {
        self.files_seen += 1;
        if report.written {
            self.files_written += 1;
        } else {
            self.files_empty += 1;
        }

        self.rows_read += report.rows_read;
        self.rows_incomplete += report.rows_incomplete;
        self.rows_ragged += report.rows_ragged;
        self.rows_malformed_grade += report.rows_malformed_grade;
        self.groups_written += report.groups;
    }

    pub fn record_failure(&mut self) {
        self.files_seen += 1;
        self.files_failed += 1;
    }

    /// Marks the run as finished.
    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }
}
