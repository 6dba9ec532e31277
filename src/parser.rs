//! Reader for the raw CSV files written by the collector.

use csv::ReaderBuilder;

use crate::error::Result;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A raw CSV file split into its header and data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parses raw CSV bytes, stripping a leading UTF-8 byte-order mark.
///
/// Returns `None` for input with no records at all.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 CSV.
pub fn parse_table(bytes: &[u8]) -> Result<Option<RawTable>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let mut records = records.into_iter();
    Ok(records.next().map(|header| RawTable {
        header,
        rows: records.collect(),
    }))
}
