pub mod grid;
pub mod keepalive;
pub mod parse;
pub mod serve;

pub use grid::Grid;
pub use parse::{parse_schedule, parse_schedule_with, ParseOptions, ScheduleError};
