//! I/O module for the HTG binary format and the CSV interchange format

pub mod crc;
pub mod csv;
pub mod htg;

pub use csv::{CsvReader, CsvWriter};
pub use htg::{HtgReader, HtgWriter};
