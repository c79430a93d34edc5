pub mod file;
pub mod log;
pub mod report;
pub mod timer;
pub mod timer_logger;

use humansize::{BINARY, format_size};

pub fn human_size(bytes: u64) -> String {
    format_size(bytes, BINARY.decimal_places(2))
}
