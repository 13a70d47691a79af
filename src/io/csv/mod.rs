//! CSV interchange for tool records
//!
//! A convenience path next to the authoritative binary file: comma
//! separated text with RFC-4180 quoting, a fixed header row, and one row
//! per tool. Z offsets never travel through CSV, so importing geometry
//! data cannot overwrite an operator-calibrated Z.

mod reader;
mod writer;

pub use reader::{CsvImport, CsvReader, SkipReason, SkippedRow};
pub use writer::CsvWriter;

/// The fixed header row of the interchange format
pub const CSV_HEADER: &str = "Tool No.,Tool Name,Tool Diameter,Tool Dia Wear";

/// Decimal places used for exported length values
pub(crate) const EXPORT_PRECISION: usize = 3;
