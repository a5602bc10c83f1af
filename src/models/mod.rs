
pub use speed_test::{
    display_metric, round_to_hundredths, ServerInfo, SpeedTestResult, BYTES_PER_MEGABIT,
};
