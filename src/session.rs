//! Load-edit-save session
//!
//! A `Session` pairs the reserved slot 0 with the 104 editable records so
//! a save can always rebuild the file without re-deriving the opaque
//! bytes. The pairing is an owned value, created by one load and consumed
//! by saves of the same file — never shared global state.

use crate::convert;
use crate::error::Result;
use crate::io::csv::{CsvImport, CsvReader, CsvWriter};
use crate::io::htg::{OpaqueSlot, EDITABLE_RECORD_COUNT};
use crate::record::ToolRecord;
use crate::types::{ToolNumber, Units};

/// One load-edit-save cycle over a tool file
///
/// Holds the opaque reserved record, the full editable record set
/// (always exactly 104 records, numbered 1-104 in order), and the unit
/// the length values are currently expressed in. Records may be edited
/// freely for the life of the session; CRCs are recomputed from scratch
/// at write time.
#[derive(Debug, Clone)]
pub struct Session {
    slot0: OpaqueSlot,
    records: Vec<ToolRecord>,
    units: Units,
}

impl Session {
    /// Create an empty session: an all-zero reserved slot and 104 unused
    /// records, in millimeters
    pub fn new() -> Self {
        let records = (1..=EDITABLE_RECORD_COUNT as u16)
            .map(|n| ToolRecord::new(ToolNumber::new(n).expect("1-104 is always valid")))
            .collect();
        Self {
            slot0: OpaqueSlot::default(),
            records,
            units: Units::Millimeters,
        }
    }

    /// Assemble a session from a successful parse; file values are
    /// millimeters
    pub(crate) fn from_parts(slot0: OpaqueSlot, records: Vec<ToolRecord>) -> Self {
        debug_assert_eq!(records.len(), EDITABLE_RECORD_COUNT);
        Self {
            slot0,
            records,
            units: Units::Millimeters,
        }
    }

    /// The reserved first record, carried byte-for-byte from the load
    #[inline]
    pub fn opaque_slot(&self) -> &OpaqueSlot {
        &self.slot0
    }

    /// The unit the record values are currently expressed in
    #[inline]
    pub fn units(&self) -> Units {
        self.units
    }

    /// All 104 editable records, in tool-number order
    #[inline]
    pub fn records(&self) -> &[ToolRecord] {
        &self.records
    }

    /// Mutable access to the record set
    pub fn records_mut(&mut self) -> &mut [ToolRecord] {
        &mut self.records
    }

    /// The record for a tool number
    pub fn record(&self, number: ToolNumber) -> &ToolRecord {
        &self.records[number.value() as usize - 1]
    }

    /// Mutable access to the record for a tool number
    pub fn record_mut(&mut self, number: ToolNumber) -> &mut ToolRecord {
        &mut self.records[number.value() as usize - 1]
    }

    /// Switch the display unit, converting every record in place
    ///
    /// No-op when the session is already in `units`.
    pub fn convert_to(&mut self, units: Units) {
        if self.units == units {
            return;
        }
        convert::convert_records(&mut self.records, self.units, units);
        self.units = units;
    }

    /// Reset every editable record to the unused state
    pub fn clear_records(&mut self) {
        for record in &mut self.records {
            record.clear();
        }
    }

    /// Merge an import into the session, returning the number of records
    /// updated
    ///
    /// For each imported row the matching record (by tool number) takes
    /// the imported name, diameter and wear — converted from the
    /// import's unit into the session's active unit — while the existing
    /// Z offset is kept: importing geometry data never overwrites an
    /// operator-calibrated Z.
    pub fn merge_imported(&mut self, import: &CsvImport) -> usize {
        let from = import.units;
        let to = self.units;
        for imported in &import.records {
            let record = self.record_mut(imported.number());
            record.tool_name = imported.tool_name.clone();
            record.tool_diameter = convert::convert_value(imported.tool_diameter, from, to);
            record.tool_dia_wear = convert::convert_value(imported.tool_dia_wear, from, to);
        }
        import.records.len()
    }

    /// Import CSV text and merge it into the session
    ///
    /// `units` is the unit the CSV values are expressed in. Returns the
    /// import report (accepted count, skipped rows).
    pub fn import_csv(&mut self, text: &str, units: Units) -> Result<CsvImport> {
        let import = CsvReader::from_text(text).read(units)?;
        self.merge_imported(&import);
        Ok(import)
    }

    /// Export the session's records as CSV text in the requested unit
    pub fn export_csv(&self, to_units: Units) -> String {
        CsvWriter::new(&self.records, self.units, to_units).write()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
