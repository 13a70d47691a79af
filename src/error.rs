//! Error types for the htgrust library

use std::io;
use thiserror::Error;

/// Main error type for htgrust operations
#[derive(Debug, Error)]
pub enum HtgError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// File is not exactly one HTG image (105 × 64 bytes)
    #[error("Invalid file size: expected {expected} bytes, got {actual} bytes")]
    WrongSize { expected: usize, actual: usize },

    /// Reserved slot 0 carries a nonzero CRC field, so this is not a
    /// recognized HTG tool file
    #[error("Not an HTG tool file: reserved slot CRC is {crc:#010X}, expected 0")]
    ForeignFile { crc: u32 },

    /// A reserved field in a tool record holds a nonzero value
    #[error("Invalid / unexpected values in reserved fields of record {record}")]
    ReservedFieldViolation { record: usize },

    /// CRC checksum mismatch in a tool record
    #[error("CRC checksum mismatch in record {record}: expected {expected:#010X}, got {actual:#010X}")]
    ChecksumMismatch {
        record: usize,
        expected: u32,
        actual: u32,
    },

    /// Write called with other than the full editable record set
    #[error("Expected {expected} tool records, got {actual}")]
    RecordCountMismatch { expected: usize, actual: usize },

    /// Tool number outside the editable range 1-104
    #[error("Tool number out of range: {0} (valid range is 1-104)")]
    InvalidToolNumber(u16),

    /// Invalid file format
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
}

/// Result type alias for htgrust operations
pub type Result<T> = std::result::Result<T, HtgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_size_display() {
        let err = HtgError::WrongSize {
            expected: 6720,
            actual: 100,
        };
        assert_eq!(
            err.to_string(),
            "Invalid file size: expected 6720 bytes, got 100 bytes"
        );
    }

    #[test]
    fn test_checksum_error() {
        let err = HtgError::ChecksumMismatch {
            record: 3,
            expected: 0x1234,
            actual: 0x5678,
        };
        assert!(err.to_string().contains("record 3"));
        assert!(err.to_string().contains("0x00001234"));
        assert!(err.to_string().contains("0x00005678"));
    }

    #[test]
    fn test_reserved_field_display() {
        let err = HtgError::ReservedFieldViolation { record: 7 };
        assert!(err.to_string().contains("record 7"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let htg_err: HtgError = io_err.into();
        assert!(matches!(htg_err, HtgError::Io(_)));
    }
}
