//! Header normalization, field parsing, row cleaning and aggregation.
//!
//! Raw rows scraped from the evaluation portal flow through these stages in
//! order: the header is resolved into a [`header::Schema`], incomplete rows
//! are dropped, the rest are cleaned into typed [`types::Cell`]s, and finally
//! rows sharing an (instructor, term) key are combined into weighted
//! summary rows.

pub mod aggregate;
pub mod fields;
pub mod header;
pub mod row;
pub mod types;
pub mod utility;
