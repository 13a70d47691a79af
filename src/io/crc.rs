//! CRC-32 implementation for HTG record integrity.
//!
//! The format uses the standard reflected CRC-32 (polynomial 0xEDB88320,
//! initial value 0xFFFFFFFF, final complement) — the same variant zip and
//! PNG use, so any third-party implementation of it must agree
//! byte-for-byte.

use once_cell::sync::Lazy;

const POLYNOMIAL: u32 = 0xEDB8_8320;

/// CRC-32 lookup table (256 × u32), built once on first use and immutable
/// afterwards, so it can be read from any number of threads without
/// locking.
static CRC32_TABLE: Lazy<[u32; 256]> = Lazy::new(|| {
    let mut table = [0u32; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let mut crc = i as u32;
        for _ in 0..8 {
            crc = if crc & 1 == 1 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
        }
        *entry = crc;
    }
    table
});

/// Compute the CRC-32 value over a byte slice.
///
/// Deterministic, pure function of its input.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc = (crc >> 8) ^ CRC32_TABLE[((crc ^ byte as u32) & 0xFF) as usize];
    }
    !crc
}
