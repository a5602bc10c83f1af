pub mod errors;
pub mod parser;
pub mod speedtest;

pub use errors::SpeedTestError;
pub use parser::parse_results;
pub use speedtest::{MeasurementSource, SpeedTestCli, DEFAULT_SPEEDTEST_COMMAND};
