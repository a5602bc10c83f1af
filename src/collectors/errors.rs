//! Error types for speed test collection

use thiserror::Error;

/// Failures while running the external speed test tool or reading its output.
/// Both variants are fatal for a run.
#[derive(Debug, Error)]
pub enum SpeedTestError {
    /// The tool could not be started for a reason other than being missing
    #[error("failed to launch `{command}`: {source}")]
    Invocation {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool's output was not the expected JSON document
    #[error("speed test output could not be parsed: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

impl SpeedTestError {
    pub fn is_malformed_output(&self) -> bool {
        matches!(self, SpeedTestError::MalformedOutput(_))
    }
}
