//! HTG (MASSO tool offset) binary format reading and writing
//!
//! An HTG file is exactly 105 fixed 64-byte records. Record 0 is reserved
//! controller configuration that is carried through saves byte-for-byte;
//! records 1-104 are the editable tool slots. All multi-byte fields are
//! little-endian.

mod reader;
mod writer;

pub use reader::HtgReader;
pub use writer::HtgWriter;

use crate::io::crc::crc32;
use crate::record::ToolRecord;

/// Total records in a file, the reserved slot included
pub const RECORD_COUNT: usize = 105;

/// Size of one record in bytes
pub const RECORD_SIZE: usize = 64;

/// Exact size of a well-formed file image
pub const FILE_SIZE: usize = RECORD_COUNT * RECORD_SIZE;

/// Editable tool slots per file (records 1-104)
pub const EDITABLE_RECORD_COUNT: usize = RECORD_COUNT - 1;

/// Size of the NUL-padded tool name field
pub const TOOL_NAME_SIZE: usize = 30;

/// Byte offsets of the fields within one 64-byte record
pub(crate) mod offset {
    pub const TOOL_NAME: usize = 0;
    pub const RESERVED1: usize = 30; // u16
    pub const RESERVED2: usize = 32; // u32
    pub const RESERVED3: usize = 36; // u32
    pub const Z_OFFSET: usize = 40; // f32
    pub const RESERVED4: usize = 44; // u32
    pub const TOOL_DIA_WEAR: usize = 48; // f32
    pub const TOOL_DIAMETER: usize = 52; // f32
    pub const RESERVED5: usize = 56; // u32
    pub const CRC: usize = 60; // u32
}

/// The reserved first record of a file
///
/// Configuration the library does not understand and must never alter:
/// the 64 bytes are captured verbatim on load and copied back unchanged
/// on save. The CRC sub-field (last four bytes, little-endian) of a
/// genuine HTG file reads as zero; anything else marks the file as
/// foreign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueSlot([u8; RECORD_SIZE]);

impl OpaqueSlot {
    pub(crate) fn from_bytes(bytes: [u8; RECORD_SIZE]) -> Self {
        OpaqueSlot(bytes)
    }

    /// The raw 64 bytes of the slot
    #[inline]
    pub fn as_bytes(&self) -> &[u8; RECORD_SIZE] {
        &self.0
    }

    /// The little-endian u32 stored in the CRC sub-field
    pub fn crc_field(&self) -> u32 {
        u32::from_le_bytes([
            self.0[offset::CRC],
            self.0[offset::CRC + 1],
            self.0[offset::CRC + 2],
            self.0[offset::CRC + 3],
        ])
    }
}

impl Default for OpaqueSlot {
    /// All-zero slot: a valid reserved record (zero CRC field) for
    /// sessions created from scratch
    fn default() -> Self {
        OpaqueSlot([0u8; RECORD_SIZE])
    }
}

/// Compute the CRC a record's bytes would carry, mirroring the write-time
/// policy: the CRC covers the first 60 bytes, and an all-zero record
/// carries no CRC at all.
pub fn record_crc(record_bytes: &[u8]) -> u32 {
    let payload = &record_bytes[..offset::CRC];
    if payload.iter().all(|&b| b == 0) {
        0
    } else {
        crc32(payload)
    }
}

pub(crate) fn is_all_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

pub(crate) fn encode_name(name: &str) -> [u8; TOOL_NAME_SIZE] {
    let mut bytes = [0u8; TOOL_NAME_SIZE];
    for (dst, ch) in bytes
        .iter_mut()
        .zip(name.chars().take(ToolRecord::MAX_NAME_LEN))
    {
        // Non-ASCII characters cannot be represented in the file
        *dst = if ch.is_ascii() { ch as u8 } else { b'?' };
    }
    bytes
}

pub(crate) fn decode_name(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    bytes[..end]
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}
