//! Value types shared across the library

mod tool_number;
mod units;

pub use tool_number::ToolNumber;
pub use units::Units;
