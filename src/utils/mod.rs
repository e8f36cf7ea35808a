pub mod constants;
pub mod datetime;
pub mod progress;
pub mod rounding;

pub use constants::*;
pub use datetime::{format_measure_time, month_start, parse_measure_time, parse_timezone};
pub use progress::ProgressReporter;
pub use rounding::{mean, round_half_up, round_report};
