//! HTG file writer

use byteorder::{ByteOrder, LittleEndian};

use super::{
    encode_name, record_crc, offset, OpaqueSlot, EDITABLE_RECORD_COUNT, FILE_SIZE, RECORD_SIZE,
    TOOL_NAME_SIZE,
};
use crate::convert;
use crate::error::{HtgError, Result};
use crate::record::ToolRecord;
use crate::session::Session;
use crate::types::Units;
use std::fs;
use std::path::Path;

/// HTG file writer
///
/// Serializes a session back into a full file image. The reserved slot 0
/// is copied through unchanged, and every record CRC is recomputed from
/// the bytes actually written — stale in-memory values are never trusted.
///
/// ```rust,ignore
/// use htgrust::io::htg::HtgWriter;
///
/// HtgWriter::new(&session).write_to_file("MASSO_5-Axis_Tools.htg")?;
/// # Ok::<(), htgrust::HtgError>(())
/// ```
pub struct HtgWriter<'a> {
    session: &'a Session,
}

impl<'a> HtgWriter<'a> {
    /// Create a writer for a session
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Build the full file image
    ///
    /// File values are always millimeters: a session presenting inches is
    /// converted on the fly, leaving the in-memory records untouched.
    pub fn write(&self) -> Result<Vec<u8>> {
        if self.session.units() == Units::Millimeters {
            return write_image(self.session.opaque_slot(), self.session.records());
        }
        let mut records = self.session.records().to_vec();
        convert::convert_records(&mut records, self.session.units(), Units::Millimeters);
        write_image(self.session.opaque_slot(), &records)
    }

    /// Build the image and persist it to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let data = self.write()?;
        fs::write(path, data)?;
        Ok(())
    }
}

/// Serialize the reserved slot and exactly 104 records into a file image
fn write_image(slot0: &OpaqueSlot, records: &[ToolRecord]) -> Result<Vec<u8>> {
    if records.len() != EDITABLE_RECORD_COUNT {
        return Err(HtgError::RecordCountMismatch {
            expected: EDITABLE_RECORD_COUNT,
            actual: records.len(),
        });
    }

    let mut data = vec![0u8; FILE_SIZE];
    data[..RECORD_SIZE].copy_from_slice(slot0.as_bytes());

    // Records land positionally in slots 1-104; the session keeps the
    // numbered-in-order invariant.
    for (i, record) in records.iter().enumerate() {
        let start = (i + 1) * RECORD_SIZE;
        encode_record(&mut data[start..start + RECORD_SIZE], record);
    }

    Ok(data)
}

/// Encode one record into its 64-byte region
///
/// The region is already zero, which guarantees the reserved fields are
/// zero on output. The CRC is written only when the first 60 bytes are
/// not all zero: an unused slot never carries a CRC.
fn encode_record(bytes: &mut [u8], record: &ToolRecord) {
    bytes[offset::TOOL_NAME..offset::TOOL_NAME + TOOL_NAME_SIZE]
        .copy_from_slice(&encode_name(&record.tool_name));
    LittleEndian::write_f32(&mut bytes[offset::Z_OFFSET..], record.z_offset);
    LittleEndian::write_f32(&mut bytes[offset::TOOL_DIA_WEAR..], record.tool_dia_wear);
    LittleEndian::write_f32(&mut bytes[offset::TOOL_DIAMETER..], record.tool_diameter);

    let crc = record_crc(bytes);
    if crc != 0 {
        LittleEndian::write_u32(&mut bytes[offset::CRC..], crc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::crc::crc32;
    use crate::types::ToolNumber;

    fn default_records() -> Vec<ToolRecord> {
        (1..=EDITABLE_RECORD_COUNT as u16)
            .map(|n| ToolRecord::new(ToolNumber::new(n).unwrap()))
            .collect()
    }

    #[test]
    fn test_record_count_mismatch() {
        let records = vec![ToolRecord::new(ToolNumber::new(1).unwrap())];
        let err = write_image(&OpaqueSlot::default(), &records).unwrap_err();
        assert!(matches!(
            err,
            HtgError::RecordCountMismatch {
                expected: EDITABLE_RECORD_COUNT,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_empty_records_produce_zero_image() {
        let data = write_image(&OpaqueSlot::default(), &default_records()).unwrap();
        assert_eq!(data.len(), FILE_SIZE);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_opaque_slot_copied_verbatim() {
        let mut slot_bytes = [0u8; RECORD_SIZE];
        for (i, b) in slot_bytes.iter_mut().enumerate().take(offset::CRC) {
            *b = i as u8;
        }
        let slot0 = OpaqueSlot::from_bytes(slot_bytes);

        let data = write_image(&slot0, &default_records()).unwrap();
        assert_eq!(&data[..RECORD_SIZE], &slot_bytes);
    }

    #[test]
    fn test_populated_record_carries_crc() {
        let mut records = default_records();
        records[49].set_name("Face Mill");
        records[49].tool_diameter = 50.0;

        let data = write_image(&OpaqueSlot::default(), &records).unwrap();
        let start = 50 * RECORD_SIZE;
        let region = &data[start..start + RECORD_SIZE];
        let stored = LittleEndian::read_u32(&region[offset::CRC..]);
        assert_eq!(stored, crc32(&region[..offset::CRC]));
        assert_ne!(stored, 0);
    }

    #[test]
    fn test_name_truncated_to_29_bytes() {
        let mut records = default_records();
        records[0].tool_name = "a".repeat(35);

        let data = write_image(&OpaqueSlot::default(), &records).unwrap();
        let region = &data[RECORD_SIZE..2 * RECORD_SIZE];
        assert_eq!(&region[..29], "a".repeat(29).as_bytes());
        assert_eq!(region[29], 0);
    }

    #[test]
    fn test_reserved_fields_zero_on_output() {
        let mut records = default_records();
        records[9].set_name("Tap M6");
        records[9].z_offset = -2.25;

        let data = write_image(&OpaqueSlot::default(), &records).unwrap();
        let region = &data[10 * RECORD_SIZE..11 * RECORD_SIZE];
        assert_eq!(LittleEndian::read_u16(&region[offset::RESERVED1..]), 0);
        assert_eq!(LittleEndian::read_u32(&region[offset::RESERVED2..]), 0);
        assert_eq!(LittleEndian::read_u32(&region[offset::RESERVED3..]), 0);
        assert_eq!(LittleEndian::read_u32(&region[offset::RESERVED4..]), 0);
        assert_eq!(LittleEndian::read_u32(&region[offset::RESERVED5..]), 0);
    }
}
