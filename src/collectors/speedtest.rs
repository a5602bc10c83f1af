//! Runs the external speed test tool and captures its JSON output

use async_trait::async_trait;
use log::{debug, info, warn};
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;

use crate::collectors::errors::SpeedTestError;

/// Tool invoked when no other command is configured
pub const DEFAULT_SPEEDTEST_COMMAND: &str = "speedtest-cli";

/// Source of raw speed test output
///
/// The production implementation shells out to [`SpeedTestCli`]; tests plug in
/// canned output instead.
#[async_trait]
pub trait MeasurementSource {
    /// Runs one measurement, optionally against a preferred server, and
    /// returns the raw text the tool produced
    async fn measure(&self, server_id: Option<&str>) -> Result<String, SpeedTestError>;
}

/// Invokes a speedtest-cli compatible program with `--json`
#[derive(Debug, Clone)]
pub struct SpeedTestCli {
    command: String,
}

impl Default for SpeedTestCli {
    fn default() -> Self {
        Self::new(DEFAULT_SPEEDTEST_COMMAND)
    }
}

impl SpeedTestCli {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Arguments passed to the tool for the given server preference
    pub fn build_args(server_id: Option<&str>) -> Vec<String> {
        let mut args = Vec::with_capacity(3);
        if let Some(id) = server_id.filter(|id| !id.is_empty()) {
            args.push("--server".to_string());
            args.push(id.to_string());
        }
        args.push("--json".to_string());
        args
    }
}

#[async_trait]
impl MeasurementSource for SpeedTestCli {
    async fn measure(&self, server_id: Option<&str>) -> Result<String, SpeedTestError> {
        info!("Executing an internet speed test");
        let args = Self::build_args(server_id);
        debug!("Running `{} {}`", self.command, args.join(" "));

        let output = match Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Empty output fails decoding, which reports the install hint
                warn!("Speed test command `{}` was not found", self.command);
                return Ok(String::new());
            }
            Err(source) => {
                return Err(SpeedTestError::Invocation {
                    command: self.command.clone(),
                    source,
                });
            }
        };

        if !output.status.success() {
            warn!(
                "Speed test command `{}` exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
