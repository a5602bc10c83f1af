//! IFTTT Maker webhook client
//!
//! Every notification goes through [`Notifier::trigger`], which POSTs a JSON
//! payload to `{base}/trigger/{hook}/with/key/{key}` and classifies the result
//! as a [`DeliveryOutcome`]. The three public operations only differ in the
//! payload they build.

use log::{error, info};
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;

use crate::models::SpeedTestResult;
use crate::notifiers::errors::{DeliveryOutcome, WebhookError};

/// Base URL of the IFTTT Maker service
pub const IFTTT_BASE_URL: &str = "https://maker.ifttt.com";

/// Upper bound on a single webhook request
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// A destination IFTTT Maker event
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookTarget {
    pub hook_name: String,
    pub secret_key: String,
}

impl WebhookTarget {
    pub fn new(hook_name: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            hook_name: hook_name.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl fmt::Debug for WebhookTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookTarget")
            .field("hook_name", &self.hook_name)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Payload for the result logging hook
pub fn results_payload(result: &SpeedTestResult) -> Value {
    json!({
        "value1": result.latency_ms,
        "value2": result.download_mbps,
        "value3": result.upload_mbps,
    })
}

/// Payload for the quality alert hook
pub fn alert_payload(message: &str) -> Value {
    json!({ "value1": message })
}

/// Payload for the ad-hoc notify summary
pub fn notify_payload(result: &SpeedTestResult) -> Value {
    json!({ "value1": result.summary() })
}

/// Sends speed test notifications to IFTTT
#[derive(Debug, Clone)]
pub struct Notifier {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: IFTTT_BASE_URL.to_string(),
            timeout: WEBHOOK_TIMEOUT,
        }
    }

    /// Points the notifier at a different Maker compatible service
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Trigger URL for a target. Contains the secret key, so it is never logged.
    pub fn trigger_url(&self, target: &WebhookTarget) -> String {
        format!(
            "{}/trigger/{}/with/key/{}",
            self.base_url, target.hook_name, target.secret_key
        )
    }

    /// Posts the raw metrics to the result logging hook
    pub async fn post_results(
        &self,
        target: &WebhookTarget,
        result: &SpeedTestResult,
    ) -> DeliveryOutcome {
        info!("Posting results to IFTTT Google sheets hook");
        self.trigger(target, &results_payload(result)).await
    }

    /// Posts a quality alert message
    pub async fn post_alert(&self, target: &WebhookTarget, message: &str) -> DeliveryOutcome {
        info!("Posting alert to IFTTT notification hook");
        self.trigger(target, &alert_payload(message)).await
    }

    /// Posts a one sentence summary of the result
    pub async fn post_notify(
        &self,
        target: &WebhookTarget,
        result: &SpeedTestResult,
    ) -> DeliveryOutcome {
        info!("Posting results to IFTTT notification hook");
        self.trigger(target, &notify_payload(result)).await
    }

    /// POSTs `payload` as JSON to the target's trigger URL
    ///
    /// 4xx/5xx answers and timeouts come back as [`DeliveryOutcome::Recovered`];
    /// every other transport failure is [`DeliveryOutcome::Fatal`]. All
    /// failures are logged here before being returned.
    pub async fn trigger(&self, target: &WebhookTarget, payload: &Value) -> DeliveryOutcome {
        let hook = target.hook_name.clone();

        let sent = self
            .client
            .post(self.trigger_url(target))
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await;

        let outcome = match sent {
            Ok(response) => {
                let status = response.status();
                if status.is_client_error() || status.is_server_error() {
                    DeliveryOutcome::from_error(WebhookError::Http {
                        hook,
                        status: status.as_u16(),
                    })
                } else {
                    info!(
                        "IFTTT webhook trigger for {} successful with status code {}",
                        target.hook_name,
                        status.as_u16()
                    );
                    DeliveryOutcome::Delivered {
                        status: status.as_u16(),
                    }
                }
            }
            Err(e) if e.is_timeout() => DeliveryOutcome::from_error(WebhookError::Timeout { hook }),
            // The URL carries the secret key
            Err(e) => DeliveryOutcome::from_error(WebhookError::Transport {
                hook,
                source: e.without_url(),
            }),
        };

        if let DeliveryOutcome::Recovered(err) | DeliveryOutcome::Fatal(err) = &outcome {
            error!("{err}");
        }
        outcome
    }
}
