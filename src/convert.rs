//! Millimeter / inch conversion for the length-valued record fields
//!
//! Conversion is a single multiplicative step in either direction; there
//! is no intermediate unit. A mm→in→mm round trip is within float
//! rounding tolerance but not bit-exact.

use crate::record::ToolRecord;
use crate::types::Units;

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

const MM_TO_INCH: f32 = 1.0 / MM_PER_INCH;

/// Convert a single length value between units
///
/// Returns the value unchanged when `from == to`.
pub fn convert_value(value: f32, from: Units, to: Units) -> f32 {
    if from == to {
        return value;
    }
    match from {
        Units::Millimeters => value * MM_TO_INCH,
        Units::Inches => value * MM_PER_INCH,
    }
}

/// Convert the three length fields of a record between units
///
/// Touches only `z_offset`, `tool_diameter` and `tool_dia_wear`; the tool
/// number and name are left alone.
pub fn convert_record(record: &mut ToolRecord, from: Units, to: Units) {
    if from == to {
        return;
    }
    record.z_offset = convert_value(record.z_offset, from, to);
    record.tool_diameter = convert_value(record.tool_diameter, from, to);
    record.tool_dia_wear = convert_value(record.tool_dia_wear, from, to);
}

/// Convert every record in a set between units
pub fn convert_records(records: &mut [ToolRecord], from: Units, to: Units) {
    if from == to {
        return;
    }
    for record in records {
        convert_record(record, from, to);
    }
}
