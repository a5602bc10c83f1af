//! Log output setup
//!
//! Lines look like `2026-10-18 09:00:00,123 - INFO - Starting` and go to
//! stdout. `RUST_LOG` overrides the default `info` filter.

use chrono::{DateTime, Local};
use env_logger::{Builder, Env, Target};
use log::Level;
use std::io::Write;

pub const DEFAULT_FILTER: &str = "info";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Renders one log line without the trailing newline
pub fn format_line(timestamp: DateTime<Local>, level: Level, message: &str) -> String {
    format!("{} - {} - {}", timestamp.format(TIMESTAMP_FORMAT), level, message)
}

/// Logger builder with the watcher's format, filter and target applied
pub fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.target(Target::Stdout).format(|buf, record| {
        writeln!(
            buf,
            "{}",
            format_line(Local::now(), record.level(), &record.args().to_string())
        )
    });
    builder
}

/// Installs the global logger. Must be called once, before anything logs.
pub fn init() {
    builder().init();
}
