//! Internet speed monitoring with IFTTT webhook reporting
//!
//! - `collectors`: runs speedtest-cli and parses its JSON output
//! - `analyzers`: threshold based connection quality checks
//! - `notifiers`: IFTTT Maker webhook delivery
//! - `runner`: the sequential pipeline tying the above together

pub mod analyzers;
pub mod cli;
pub mod collectors;
pub mod logging;
pub mod models;
pub mod notifiers;
pub mod runner;
pub mod settings;

pub use runner::{RunReport, Runner};
pub use settings::Settings;
