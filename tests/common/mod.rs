//! Shared test utilities for htgrust integration tests.

#![allow(dead_code)]

use htgrust::io::htg::{FILE_SIZE, RECORD_SIZE};
use htgrust::{HtgReader, HtgWriter, Session, ToolNumber};

/// Byte offset of a record's CRC field within the file image.
pub fn crc_offset(record: usize) -> usize {
    record * RECORD_SIZE + 60
}

/// A session with a handful of populated tool slots.
pub fn sample_session() -> Session {
    let mut session = Session::new();

    let drill = session.record_mut(tool(3));
    drill.set_name("Drill 3mm");
    drill.z_offset = -41.275;
    drill.tool_diameter = 3.0;

    let end_mill = session.record_mut(tool(7));
    end_mill.set_name("End Mill 1/4");
    end_mill.z_offset = -38.1;
    end_mill.tool_diameter = 6.35;
    end_mill.tool_dia_wear = 0.01;

    let face_mill = session.record_mut(tool(104));
    face_mill.set_name("Face Mill");
    face_mill.tool_diameter = 50.0;

    session
}

/// A well-formed file image built from [`sample_session`].
pub fn sample_image() -> Vec<u8> {
    let image = HtgWriter::new(&sample_session()).write().unwrap();
    assert_eq!(image.len(), FILE_SIZE);
    image
}

/// Parse an image back into a session.
pub fn parse(image: &[u8]) -> Session {
    HtgReader::from_bytes(image.to_vec()).read().unwrap()
}

pub fn tool(n: u16) -> ToolNumber {
    ToolNumber::new(n).unwrap()
}
