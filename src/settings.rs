//! Layered runtime settings
//!
//! Values are resolved from, lowest to highest precedence: built-in defaults,
//! an optional config file, `SPEED_WATCHER_*` environment variables, and
//! finally command-line flags (see [`Settings::apply_cli`]).

use ::config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;
use std::path::Path;

use crate::analyzers::Thresholds;
use crate::cli::Cli;
use crate::collectors::DEFAULT_SPEEDTEST_COMMAND;
use crate::notifiers::{WebhookTarget, IFTTT_BASE_URL};

/// Prefix for environment variable overrides, e.g. `SPEED_WATCHER_HOOK_SECRET_KEY`
pub const ENV_PREFIX: &str = "SPEED_WATCHER";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// IFTTT event that receives the raw results
    pub result_hook_name: Option<String>,
    /// IFTTT event that receives alerts and notify summaries
    pub alert_hook_name: Option<String>,
    /// Maker key shared by both events
    pub hook_secret_key: Option<String>,
    /// Alert when upload drops below this many Mbps
    pub upload_threshold: Option<i64>,
    /// Alert when download drops below this many Mbps
    pub download_threshold: Option<i64>,
    /// Alert when latency rises above this many milliseconds
    pub latency_threshold: Option<i64>,
    /// Preferred speedtest.net server
    pub speedtest_server_id: Option<String>,
    /// Post a summary of every run to the alert event
    pub notify: bool,
    pub speedtest_command: String,
    pub webhook_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            result_hook_name: None,
            alert_hook_name: None,
            hook_secret_key: None,
            upload_threshold: None,
            download_threshold: None,
            latency_threshold: None,
            speedtest_server_id: None,
            notify: false,
            speedtest_command: DEFAULT_SPEEDTEST_COMMAND.to_string(),
            webhook_base_url: IFTTT_BASE_URL.to_string(),
        }
    }
}

/// Treats empty strings the same as a missing value
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Treats a zero threshold the same as a missing one
fn threshold(value: Option<i64>) -> Option<f64> {
    value.filter(|v| *v != 0).map(|v| v as f64)
}

impl Settings {
    /// Loads settings from the optional file and the process environment.
    /// A config file that does not exist is skipped.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::build(path, None)
    }

    /// Same as [`Settings::load`] but reads environment overrides from `env`
    /// instead of the process environment
    pub fn load_with_env(
        path: Option<&Path>,
        env: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        Self::build(path, Some(env))
    }

    fn build(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).source(env));

        builder.build()?.try_deserialize()
    }

    /// Overlays every flag that was given on the command line
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        fn overlay<T: Clone>(slot: &mut Option<T>, flag: &Option<T>) {
            if flag.is_some() {
                *slot = flag.clone();
            }
        }

        overlay(&mut self.result_hook_name, &cli.result_hook_name);
        overlay(&mut self.alert_hook_name, &cli.alert_hook_name);
        overlay(&mut self.hook_secret_key, &cli.hook_secret_key);
        overlay(&mut self.upload_threshold, &cli.upload_threshold);
        overlay(&mut self.download_threshold, &cli.download_threshold);
        overlay(&mut self.latency_threshold, &cli.latency_threshold);
        overlay(&mut self.speedtest_server_id, &cli.speedtest_server_id);
        self.notify |= cli.notify;
        self
    }

    /// Target for raw result posting, when both the hook and key are set
    pub fn result_target(&self) -> Option<WebhookTarget> {
        Some(WebhookTarget::new(
            present(&self.result_hook_name)?,
            present(&self.hook_secret_key)?,
        ))
    }

    /// Target for alerts and notify summaries, when both the hook and key are set
    pub fn alert_target(&self) -> Option<WebhookTarget> {
        Some(WebhookTarget::new(
            present(&self.alert_hook_name)?,
            present(&self.hook_secret_key)?,
        ))
    }

    pub fn alert_enabled(&self) -> bool {
        self.alert_target().is_some()
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(
            threshold(self.latency_threshold),
            threshold(self.download_threshold),
            threshold(self.upload_threshold),
        )
    }

    pub fn server_id(&self) -> Option<&str> {
        present(&self.speedtest_server_id)
    }
}
