//! Decodes speedtest-cli JSON output into a [`SpeedTestResult`]

use log::{error, info};
use serde::Deserialize;
use serde_json::Value;

use crate::collectors::errors::SpeedTestError;
use crate::models::{ServerInfo, SpeedTestResult};

/// Fields of the tool's JSON document that the watcher relies on
#[derive(Debug, Deserialize)]
struct RawSpeedTestOutput {
    download: f64,
    upload: f64,
    server: RawServer,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    latency: f64,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    sponsor: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl RawServer {
    fn info(&self) -> ServerInfo {
        // speedtest-cli reports the id as a string, other builds as a number
        let id = self.id.as_ref().and_then(|id| match id {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        });

        ServerInfo {
            id,
            name: self.name.clone(),
            sponsor: self.sponsor.clone(),
            country: self.country.clone(),
        }
    }
}

/// Parses the raw tool output
///
/// Any decoding problem, including a missing `download`, `upload` or
/// `server.latency` field, is reported as [`SpeedTestError::MalformedOutput`].
pub fn parse_results(raw: &str) -> Result<SpeedTestResult, SpeedTestError> {
    info!("Parsing speed test results");

    let parsed: RawSpeedTestOutput = serde_json::from_str(raw).map_err(|e| {
        error!("Could not parse json: {e}");
        error!("Ensure speedtest-cli binary is installed and in environment path");
        SpeedTestError::MalformedOutput(e)
    })?;

    Ok(
        SpeedTestResult::from_raw(parsed.download, parsed.upload, parsed.server.latency)
            .with_server(parsed.server.info()),
    )
}
