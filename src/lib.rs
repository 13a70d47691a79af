//! # htgrust
//!
//! A pure Rust library for reading and writing MASSO CNC tool offset
//! files (HTG format).
//!
//! An HTG file is a fixed 6,720-byte image of 105 64-byte records: one
//! reserved controller record that is preserved byte-for-byte, and 104
//! editable tool slots protected by per-record CRC-32 checksums. The
//! library parses and writes that image exactly, exchanges records with
//! a CSV interchange format, and converts length values between
//! millimeters and inches.
//!
//! ## Features
//!
//! - Exact byte-layout parsing and writing of the 105-record image
//! - Per-record CRC-32 generation and validation
//! - Foreign/corrupt file detection via reserved-field checks
//! - CSV import/export (RFC-4180 quoting), lenient on bad rows
//! - Millimeter/inch conversion stable across load/convert/save cycles
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use htgrust::{HtgReader, HtgWriter, Units};
//!
//! // Load a tool file
//! let mut session = HtgReader::from_file("MASSO_5-Axis_Tools.htg")?.read()?;
//!
//! // Edit records, switch display units
//! session.convert_to(Units::Inches);
//! session.records_mut()[0].set_name("End Mill 1/4");
//!
//! // Write it back (values are stored in millimeters)
//! HtgWriter::new(&session).write_to_file("MASSO_5-Axis_Tools.htg")?;
//! # Ok::<(), htgrust::HtgError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`Session`] - one load-edit-save cycle: the reserved slot plus the
//!   104 live records
//! - [`ToolRecord`] - plain-data model of one editable slot
//! - [`io::htg`] - the binary record codec (buffer-in/buffer-out)
//! - [`io::csv`] - the CSV interchange path
//! - [`io::crc`] - the CRC-32 engine
//! - [`convert`] - millimeter/inch conversion
//!
//! Parsing is all-or-nothing: a structurally invalid file is rejected
//! outright rather than repaired, because the controller configuration
//! is safety-relevant. CSV import is the lenient convenience path.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod error;
pub mod io;
pub mod record;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use error::{HtgError, Result};
pub use record::ToolRecord;
pub use session::Session;
pub use types::{ToolNumber, Units};

// Re-export I/O types
pub use io::csv::{CsvImport, CsvReader, CsvWriter};
pub use io::htg::{HtgReader, HtgWriter, OpaqueSlot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
