//! Tool record model
//!
//! A `ToolRecord` is the in-memory form of one editable slot of the file.
//! It is plain data: the on-disk CRC is derived by the writer on every
//! save and is not carried here.

use crate::types::{ToolNumber, Units};

/// One editable tool-offset record
///
/// The three length fields are unit-tagged by the surrounding
/// [`Session`](crate::Session): millimeters immediately after a load,
/// possibly inches after a display-unit switch.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRecord {
    tool_number: ToolNumber,
    /// Tool name; encoded as ASCII and truncated to 29 bytes on write
    pub tool_name: String,
    /// Z axis offset
    pub z_offset: f32,
    /// Tool diameter
    pub tool_diameter: f32,
    /// Tool diameter wear compensation
    pub tool_dia_wear: f32,
}

impl ToolRecord {
    /// Longest tool name the file can hold (the 30-byte name field keeps
    /// one byte for the NUL terminator)
    pub const MAX_NAME_LEN: usize = 29;

    /// Create an empty record for the given slot
    pub fn new(tool_number: ToolNumber) -> Self {
        Self {
            tool_number,
            tool_name: String::new(),
            z_offset: 0.0,
            tool_diameter: 0.0,
            tool_dia_wear: 0.0,
        }
    }

    /// The identity key of this record; fixed for its lifetime
    #[inline]
    pub const fn number(&self) -> ToolNumber {
        self.tool_number
    }

    /// Set the tool name, truncating to [`MAX_NAME_LEN`](Self::MAX_NAME_LEN)
    /// characters
    pub fn set_name(&mut self, name: &str) {
        self.tool_name = truncate_name(name);
    }

    /// Whether this record would encode as an all-zero slot
    ///
    /// The length fields are compared at the bit level: `-0.0` has a sign
    /// bit set and therefore makes the record non-empty, matching the
    /// byte-level test the writer performs.
    pub fn is_empty(&self) -> bool {
        self.tool_name.is_empty()
            && self.z_offset.to_bits() == 0
            && self.tool_diameter.to_bits() == 0
            && self.tool_dia_wear.to_bits() == 0
    }

    /// Reset every editable field, keeping the tool number
    pub fn clear(&mut self) {
        self.tool_name.clear();
        self.z_offset = 0.0;
        self.tool_diameter = 0.0;
        self.tool_dia_wear = 0.0;
    }

    /// Convert the three length fields from one unit to the other
    ///
    /// The tool number and name are never touched. See
    /// [`convert_value`](crate::convert::convert_value) for the factor.
    pub fn convert(&mut self, from: Units, to: Units) {
        crate::convert::convert_record(self, from, to);
    }
}

/// Truncate a name to the longest encodable length
pub(crate) fn truncate_name(name: &str) -> String {
    name.chars().take(ToolRecord::MAX_NAME_LEN).collect()
}
