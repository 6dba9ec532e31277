//! Cell and row types shared by the cleaning stages.

use std::fmt;

/// A single typed value in a cleaned row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    /// "No data", e.g. a grade reported as `(N/A)`. Written as an empty field.
    Empty,
}

impl Cell {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Cell::Float(_))
    }
}

impl fmt::Display for Cell {
    /// Floats always carry a decimal digit (`84.0`, `3.62`) so the column type
    /// survives a round trip through the output CSV.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) if v.fract() == 0.0 => write!(f, "{v:.1}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// A cleaned row, aligned to the expanded header.
pub type Row = Vec<Cell>;
