//! CSV import
//!
//! Import is lenient by design: the binary file is the source of truth,
//! so malformed or out-of-range rows are skipped and reported rather
//! than failing the whole import.

use crate::error::{HtgError, Result};
use crate::record::{truncate_name, ToolRecord};
use crate::types::{ToolNumber, Units};
use std::fmt;
use std::fs;
use std::path::Path;

/// Why a CSV data row was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The row had fewer than the four required fields
    TooFewFields,
    /// The first column was not an integer between 1 and 104
    InvalidToolNumber,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields => write!(f, "fewer than 4 fields"),
            Self::InvalidToolNumber => write!(f, "tool number missing or outside 1-104"),
        }
    }
}

/// One skipped data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based data row index (the header is row 0)
    pub row: usize,
    /// Why the row was dropped
    pub reason: SkipReason,
}

/// Result of a CSV import
///
/// Row-level problems are collected here instead of raised, the same way
/// non-fatal parse issues are reported as values elsewhere in the
/// library.
#[derive(Debug, Clone)]
pub struct CsvImport {
    /// Accepted records, in input order; Z offsets are always zero
    pub records: Vec<ToolRecord>,
    /// The unit the diameter/wear values are expressed in, exactly as
    /// supplied by the caller — no conversion has been applied
    pub units: Units,
    /// Rows that were dropped, with reasons
    pub skipped: Vec<SkippedRow>,
}

impl CsvImport {
    /// Number of accepted rows
    pub fn accepted(&self) -> usize {
        self.records.len()
    }
}

/// CSV file reader
///
/// ```rust,ignore
/// use htgrust::io::csv::CsvReader;
/// use htgrust::types::Units;
///
/// let import = CsvReader::from_file("tools.csv")?.read(Units::Millimeters)?;
/// println!("imported {} tools, skipped {}", import.accepted(), import.skipped.len());
/// # Ok::<(), htgrust::HtgError>(())
/// ```
pub struct CsvReader {
    text: String,
}

impl CsvReader {
    /// Create a reader over in-memory CSV text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Create a reader over the contents of a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            text: fs::read_to_string(path)?,
        })
    }

    /// Parse the text, interpreting diameter and wear values in `units`
    ///
    /// Values are taken as-is in that unit; converting them into a
    /// session's active unit is the caller's job (see
    /// [`Session::merge_imported`](crate::Session::merge_imported)).
    pub fn read(self, units: Units) -> Result<CsvImport> {
        let rows = split_rows(&self.text);
        if rows.len() < 2 {
            return Err(HtgError::InvalidFormat(
                "CSV must contain a header row and at least one data row".to_string(),
            ));
        }

        let mut records = Vec::new();
        let mut skipped = Vec::new();

        // Row 0 is the header
        for (row, fields) in rows.iter().enumerate().skip(1) {
            if fields.len() < 4 {
                skipped.push(SkippedRow {
                    row,
                    reason: SkipReason::TooFewFields,
                });
                continue;
            }

            let number = match fields[0].parse::<u16>().ok().and_then(|n| ToolNumber::new(n).ok()) {
                Some(number) => number,
                None => {
                    skipped.push(SkippedRow {
                        row,
                        reason: SkipReason::InvalidToolNumber,
                    });
                    continue;
                }
            };

            let mut record = ToolRecord::new(number);
            record.tool_name = truncate_name(&fields[1]);
            // Unparsable numeric fields fall back to zero instead of
            // dropping the row
            record.tool_diameter = fields[2].parse::<f32>().unwrap_or(0.0);
            record.tool_dia_wear = fields[3].parse::<f32>().unwrap_or(0.0);
            // Z offset is never read from CSV
            record.z_offset = 0.0;
            records.push(record);
        }

        Ok(CsvImport {
            records,
            units,
            skipped,
        })
    }
}

/// Split CSV text into rows of trimmed fields with RFC-4180 quoting
///
/// A quoted field may contain literal commas and newlines; a doubled
/// quote inside a quoted field decodes to a single quote. Rows that are
/// completely empty (blank lines) are dropped.
fn split_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => fields.push(finish_field(&mut field)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                finish_row(&mut rows, &mut fields, &mut field);
            }
            '\n' => finish_row(&mut rows, &mut fields, &mut field),
            _ => field.push(c),
        }
    }
    finish_row(&mut rows, &mut fields, &mut field);

    rows
}

fn finish_field(field: &mut String) -> String {
    let finished = field.trim().to_string();
    field.clear();
    finished
}

fn finish_row(rows: &mut Vec<Vec<String>>, fields: &mut Vec<String>, field: &mut String) {
    fields.push(finish_field(field));
    let row = std::mem::take(fields);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv::CSV_HEADER;

    fn import(text: &str) -> CsvImport {
        CsvReader::from_text(text).read(Units::Millimeters).unwrap()
    }

    #[test]
    fn test_split_rows_plain() {
        let rows = split_rows("a,b,c\n1,2,3\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_split_rows_quoting() {
        let rows = split_rows("\"a,b\",\"say \"\"hi\"\"\",\"line\nbreak\"\n");
        assert_eq!(rows, vec![vec!["a,b", "say \"hi\"", "line\nbreak"]]);
    }

    #[test]
    fn test_split_rows_crlf_and_blank_lines() {
        let rows = split_rows("a,b\r\n\r\nc,d\r\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_import_basic_row() {
        let text = format!("{CSV_HEADER}\r\n5,End Mill 1/4,6.350,0.010\r\n");
        let result = import(&text);
        assert_eq!(result.accepted(), 1);
        assert!(result.skipped.is_empty());

        let record = &result.records[0];
        assert_eq!(record.number().value(), 5);
        assert_eq!(record.tool_name, "End Mill 1/4");
        assert!((record.tool_diameter - 6.35).abs() < 1e-5);
        assert!((record.tool_dia_wear - 0.010).abs() < 1e-5);
        assert_eq!(record.z_offset, 0.0);
    }

    #[test]
    fn test_import_skips_bad_rows() {
        let text = format!(
            "{CSV_HEADER}\n0,Below Range,1.0,0.0\n200,Above Range,1.0,0.0\nabc,Not A Number,1.0,0.0\n7,Only Three Fields,1.0\n9,Good,2.5,0.1\n"
        );
        let result = import(&text);
        assert_eq!(result.accepted(), 1);
        assert_eq!(result.records[0].number().value(), 9);

        let reasons: Vec<_> = result.skipped.iter().map(|s| (s.row, s.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (1, SkipReason::InvalidToolNumber),
                (2, SkipReason::InvalidToolNumber),
                (3, SkipReason::InvalidToolNumber),
                (4, SkipReason::TooFewFields),
            ]
        );
    }

    #[test]
    fn test_import_unparsable_numbers_default_to_zero() {
        let text = format!("{CSV_HEADER}\n12,Drill,not-a-number,0.5\n");
        let result = import(&text);
        assert_eq!(result.accepted(), 1);
        assert_eq!(result.records[0].tool_diameter, 0.0);
        assert!((result.records[0].tool_dia_wear - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_import_truncates_long_names() {
        let long_name = "b".repeat(35);
        let text = format!("{CSV_HEADER}\n3,{long_name},1.0,0.0\n");
        let result = import(&text);
        assert_eq!(result.records[0].tool_name.len(), 29);
    }

    #[test]
    fn test_import_units_carried_as_is() {
        let text = format!("{CSV_HEADER}\n4,Inch Tool,0.250,0.001\n");
        let result = CsvReader::from_text(text).read(Units::Inches).unwrap();
        assert_eq!(result.units, Units::Inches);
        // Values are untouched: 0.250 stays 0.250, in inches
        assert!((result.records[0].tool_diameter - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_import_requires_header_and_data() {
        let err = CsvReader::from_text(CSV_HEADER)
            .read(Units::Millimeters)
            .unwrap_err();
        assert!(matches!(err, HtgError::InvalidFormat(_)));
    }
}
