pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use coordinates::{decimal_to_dms, format_dms, parse_coordinate, round_to};
pub use filename::{converted_filename, default_batch_output, generate_log_filename};
pub use logging::{init_logging, log_conversion};
pub use progress::ProgressReporter;
