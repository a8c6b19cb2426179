//! Metadata extraction from engine diagnostic output

mod parser;

pub use parser::{extract_file_info, parse_dimensions, parse_duration, parse_fps, scan_log};
