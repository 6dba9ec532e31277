pub mod cleaning;
pub mod error;
pub mod output;
pub mod parser;
pub mod stats;
pub mod walker;
