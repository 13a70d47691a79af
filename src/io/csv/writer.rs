//! CSV export

use super::{CSV_HEADER, EXPORT_PRECISION};
use crate::convert::convert_value;
use crate::error::Result;
use crate::record::ToolRecord;
use crate::types::Units;
use std::fs;
use std::path::Path;

/// CSV file writer
///
/// Writes the header row followed by one row per record, in the order
/// given. Diameter and wear are converted from the unit the records are
/// currently expressed in to the requested export unit; Z offsets are
/// never exported.
///
/// ```rust,ignore
/// use htgrust::io::csv::CsvWriter;
/// use htgrust::types::Units;
///
/// let text = CsvWriter::new(session.records(), session.units(), Units::Inches).write();
/// # let _ = text;
/// ```
pub struct CsvWriter<'a> {
    records: &'a [ToolRecord],
    from_units: Units,
    to_units: Units,
}

impl<'a> CsvWriter<'a> {
    /// Create a writer over a record set
    ///
    /// `from_units` is the unit the in-memory values are expressed in;
    /// `to_units` is the unit the CSV should carry.
    pub fn new(records: &'a [ToolRecord], from_units: Units, to_units: Units) -> Self {
        Self {
            records,
            from_units,
            to_units,
        }
    }

    /// Build the CSV text
    pub fn write(&self) -> String {
        let mut out = String::new();
        out.push_str(CSV_HEADER);
        out.push_str("\r\n");

        for record in self.records {
            let diameter = convert_value(record.tool_diameter, self.from_units, self.to_units);
            let wear = convert_value(record.tool_dia_wear, self.from_units, self.to_units);
            out.push_str(&format!(
                "{},{},{:.prec$},{:.prec$}\r\n",
                record.number(),
                escape_field(&record.tool_name),
                diameter,
                wear,
                prec = EXPORT_PRECISION,
            ));
        }

        out
    }

    /// Build the CSV text and persist it to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.write())?;
        Ok(())
    }
}

/// Quote a field when it contains a comma, quote or line break, doubling
/// any embedded quotes — the inverse of the import rule
fn escape_field(field: &str) -> String {
    if field.contains(|c| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
