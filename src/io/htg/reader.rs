//! HTG file reader

use byteorder::{ByteOrder, LittleEndian};

use super::{
    decode_name, is_all_zero, offset, OpaqueSlot, EDITABLE_RECORD_COUNT, FILE_SIZE, RECORD_SIZE,
    TOOL_NAME_SIZE,
};
use crate::error::{HtgError, Result};
use crate::io::crc::crc32;
use crate::record::ToolRecord;
use crate::session::Session;
use crate::types::ToolNumber;
use std::fs;
use std::path::Path;

/// HTG file reader
///
/// The reader owns a full file image and parses it in one pass. Parsing
/// is all-or-nothing: any structural violation aborts the load and no
/// partial record set is returned.
///
/// ```rust,ignore
/// use htgrust::io::htg::HtgReader;
///
/// let session = HtgReader::from_file("MASSO_5-Axis_Tools.htg")?.read()?;
/// # Ok::<(), htgrust::HtgError>(())
/// ```
pub struct HtgReader {
    data: Vec<u8>,
}

impl HtgReader {
    /// Create a reader over an in-memory file image
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// Create a reader over the contents of a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            data: fs::read(path)?,
        })
    }

    /// Parse the image into a session
    ///
    /// The returned session holds the reserved slot 0 verbatim, the 104
    /// editable records in file order, and presents values in
    /// millimeters (the at-rest unit of the file).
    pub fn read(self) -> Result<Session> {
        let (slot0, records) = parse_image(&self.data)?;
        Ok(Session::from_parts(slot0, records))
    }
}

/// Parse a full file image into the reserved slot and the editable records
fn parse_image(data: &[u8]) -> Result<(OpaqueSlot, Vec<ToolRecord>)> {
    if data.len() != FILE_SIZE {
        return Err(HtgError::WrongSize {
            expected: FILE_SIZE,
            actual: data.len(),
        });
    }

    // Record 0 is carried verbatim; a nonzero CRC field marks a foreign
    // or corrupt file.
    let mut slot0_bytes = [0u8; RECORD_SIZE];
    slot0_bytes.copy_from_slice(&data[..RECORD_SIZE]);
    let slot0 = OpaqueSlot::from_bytes(slot0_bytes);
    if slot0.crc_field() != 0 {
        return Err(HtgError::ForeignFile {
            crc: slot0.crc_field(),
        });
    }

    let mut records = Vec::with_capacity(EDITABLE_RECORD_COUNT);
    for index in 1..=EDITABLE_RECORD_COUNT {
        let start = index * RECORD_SIZE;
        let record_bytes = &data[start..start + RECORD_SIZE];
        records.push(parse_record(record_bytes, index)?);
    }

    Ok((slot0, records))
}

/// Parse one editable record, validating reserved fields and the CRC
fn parse_record(bytes: &[u8], index: usize) -> Result<ToolRecord> {
    let number = ToolNumber::new(index as u16)?;

    // An all-zero record is an unused slot; it carries no CRC and skips
    // the reserved-field checks.
    if is_all_zero(bytes) {
        return Ok(ToolRecord::new(number));
    }

    validate_reserved_fields(bytes, index)?;
    validate_crc(bytes, index)?;

    let mut record = ToolRecord::new(number);
    record.tool_name = decode_name(&bytes[offset::TOOL_NAME..offset::TOOL_NAME + TOOL_NAME_SIZE]);
    record.z_offset = LittleEndian::read_f32(&bytes[offset::Z_OFFSET..]);
    record.tool_dia_wear = LittleEndian::read_f32(&bytes[offset::TOOL_DIA_WEAR..]);
    record.tool_diameter = LittleEndian::read_f32(&bytes[offset::TOOL_DIAMETER..]);
    Ok(record)
}

/// Every reserved field must read as zero
fn validate_reserved_fields(bytes: &[u8], index: usize) -> Result<()> {
    let clean = LittleEndian::read_u16(&bytes[offset::RESERVED1..]) == 0
        && LittleEndian::read_u32(&bytes[offset::RESERVED2..]) == 0
        && LittleEndian::read_u32(&bytes[offset::RESERVED3..]) == 0
        && LittleEndian::read_u32(&bytes[offset::RESERVED4..]) == 0
        && LittleEndian::read_u32(&bytes[offset::RESERVED5..]) == 0;
    if clean {
        Ok(())
    } else {
        Err(HtgError::ReservedFieldViolation { record: index })
    }
}

/// The stored CRC must match the CRC of the first 60 bytes
fn validate_crc(bytes: &[u8], index: usize) -> Result<()> {
    let stored = LittleEndian::read_u32(&bytes[offset::CRC..]);
    let computed = crc32(&bytes[..offset::CRC]);
    if stored == computed {
        Ok(())
    } else {
        Err(HtgError::ChecksumMismatch {
            record: index,
            expected: computed,
            actual: stored,
        })
    }
}
