//! Collapses cleaned rows into one weighted summary row per (instructor, term).

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::cleaning::header::{RESP_RATE, Schema};
use crate::cleaning::types::{Cell, Row};
use crate::cleaning::utility::{round2, weighted_mean};
use crate::error::{CleanError, Result};

/// Aggregation key: instructor name and term, as written in the cleaned row.
type GroupKey = (String, String);

/// Running sums for one (instructor, term) group.
///
/// Float columns are discovered from the seed row; later members only
/// contribute to columns the seed already treats as floats.
struct Accumulator {
    key: GroupKey,
    seed: Row,
    total_enrolled: i64,
    /// Σ(enrolled · resp_rate)
    rate_numerator: f64,
    /// (column, Σ(value · enrolled · resp_rate), Σ(enrolled · resp_rate))
    float_columns: Vec<(usize, f64, f64)>,
}

impl Accumulator {
    fn new(key: GroupKey, seed: Row, enrolled: usize, resp_rate: usize) -> Self {
        let float_columns = seed
            .iter()
            .enumerate()
            .filter(|(i, cell)| *i != enrolled && *i != resp_rate && cell.is_float())
            .map(|(i, _)| (i, 0.0, 0.0))
            .collect();

        Accumulator {
            key,
            seed,
            total_enrolled: 0,
            rate_numerator: 0.0,
            float_columns,
        }
    }

    fn push(&mut self, row: &Row, enrolled_index: usize, resp_rate_index: usize) -> Result<()> {
        let enrolled = match row[enrolled_index].as_int() {
            Some(n) => n,
            None => {
                warn!(
                    instructor = %self.key.0,
                    term = %self.key.1,
                    enrolled = %row[enrolled_index],
                    "Non-numeric enrollment counted as zero"
                );
                0
            }
        };
        let resp_rate = row[resp_rate_index].as_float().unwrap_or(0.0);
        let weight = enrolled as f64 * resp_rate;

        self.total_enrolled = self.total_enrolled.checked_add(enrolled).ok_or_else(|| {
            CleanError::EnrollmentOverflow {
                instructor: self.key.0.clone(),
                term: self.key.1.clone(),
            }
        })?;
        self.rate_numerator += weight;

        for (column, numerator, weight_sum) in &mut self.float_columns {
            if let Some(value) = row.get(*column).and_then(Cell::as_float) {
                *numerator += value * weight;
                *weight_sum += weight;
            }
        }

        Ok(())
    }

    fn finish(self, schema: &Schema) -> Result<Row> {
        let zero_weight = |column: &str| CleanError::ZeroWeight {
            instructor: self.key.0.clone(),
            term: self.key.1.clone(),
            column: column.to_string(),
        };

        let resp_rate = weighted_mean(self.rate_numerator, self.total_enrolled as f64)
            .ok_or_else(|| zero_weight(RESP_RATE))?;

        let mut combined = self.seed.clone();
        combined[schema.enrolled_index()] = Cell::Int(self.total_enrolled);
        combined[schema.resp_rate_index()] = Cell::Float(round2(resp_rate));

        for &(column, numerator, weight_sum) in &self.float_columns {
            let name = schema.header.get(column).map(String::as_str).unwrap_or("?");
            let mean = weighted_mean(numerator, weight_sum).ok_or_else(|| zero_weight(name))?;
            combined[column] = Cell::Float(round2(mean));
        }

        Ok(combined)
    }
}

/// Combines cleaned rows sharing an (instructor, term) key.
///
/// Enrollment is summed, the response rate is averaged weighted by enrollment,
/// and every other float column is averaged weighted by enrollment times
/// response rate. Non-float columns keep the value from the group's first
/// row. Groups are returned in first-seen order.
///
/// Which columns count as floats is decided by the group's first row. A
/// grade column whose first row is [`Cell::Empty`] keeps that empty value
/// even when later members carry a grade, so such a column can change with
/// row order; enrollment and response rate never do.
///
/// Every row must be at least as wide as `schema.header`.
///
/// # Errors
///
/// Returns [`CleanError::RowWidth`] for a row narrower than the header,
/// [`CleanError::EnrollmentOverflow`] when a group's enrollment total
/// overflows, and [`CleanError::ZeroWeight`] when a group's weights sum to
/// zero.
pub fn combine_rows(rows: &[Row], schema: &Schema) -> Result<Vec<Row>> {
    let instructor = schema.expanded(schema.instructor);
    let term = schema.expanded(schema.term);
    let enrolled = schema.enrolled_index();
    let resp_rate = schema.resp_rate_index();

    let mut positions: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<Accumulator> = Vec::new();

    for row in rows {
        if row.len() < schema.header.len() {
            return Err(CleanError::RowWidth {
                expected: schema.header.len(),
                found: row.len(),
            });
        }

        let key = (row[instructor].to_string(), row[term].to_string());

        let slot = match positions.get(&key) {
            Some(&slot) => slot,
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(Accumulator::new(key, row.clone(), enrolled, resp_rate));
                groups.len() - 1
            }
        };

        groups[slot].push(row, enrolled, resp_rate)?;
    }

    debug!(rows = rows.len(), groups = groups.len(), "Rows grouped");

    groups.into_iter().map(|group| group.finish(schema)).collect()
}
