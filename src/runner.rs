//! Sequential speed test pipeline
//!
//! measure → parse → log → post results → evaluate quality → notify.
//! Each step finishes before the next one starts and the only value shared
//! between steps is the [`SpeedTestResult`].

use anyhow::Result;
use log::{debug, info};

use crate::analyzers::{QualityAnalyzer, QualityAssessment};
use crate::collectors::{parse_results, MeasurementSource, SpeedTestCli};
use crate::models::SpeedTestResult;
use crate::notifiers::{DeliveryOutcome, Notifier};
use crate::settings::Settings;

/// What happened during one run
///
/// A step that was not applicable is `None`. Webhook outcomes stored here are
/// never fatal; a fatal outcome ends the run with an error instead.
#[derive(Debug)]
pub struct RunReport {
    pub result: SpeedTestResult,
    pub results_post: Option<DeliveryOutcome>,
    pub assessment: Option<QualityAssessment>,
    pub alert_post: Option<DeliveryOutcome>,
    pub notify_post: Option<DeliveryOutcome>,
}

impl RunReport {
    /// Number of webhook requests attempted during the run
    pub fn webhooks_attempted(&self) -> usize {
        [&self.results_post, &self.alert_post, &self.notify_post]
            .iter()
            .filter(|post| post.is_some())
            .count()
    }

    /// Number of webhook requests the service accepted
    pub fn webhooks_delivered(&self) -> usize {
        [&self.results_post, &self.alert_post, &self.notify_post]
            .iter()
            .filter(|post| post.as_ref().is_some_and(DeliveryOutcome::is_delivered))
            .count()
    }
}

/// Drives one speed test run from measurement to notifications
pub struct Runner<S> {
    settings: Settings,
    source: S,
    notifier: Notifier,
}

impl Runner<SpeedTestCli> {
    /// Runner backed by the configured speed test command and webhook service
    pub fn from_settings(settings: Settings) -> Self {
        let source = SpeedTestCli::new(settings.speedtest_command.clone());
        let notifier = Notifier::new().with_base_url(settings.webhook_base_url.clone());
        Self::new(settings, source, notifier)
    }
}

impl<S: MeasurementSource> Runner<S> {
    pub fn new(settings: Settings, source: S, notifier: Notifier) -> Self {
        Self {
            settings,
            source,
            notifier,
        }
    }

    /// Runs the pipeline once
    ///
    /// Measurement and parse failures, and fatal webhook failures, end the
    /// run with an error. Recoverable webhook failures are recorded in the
    /// report and the remaining steps still run.
    pub async fn run(&self) -> Result<RunReport> {
        let raw = self.source.measure(self.settings.server_id()).await?;
        let result = parse_results(&raw)?;

        info!("{}", result.metrics_line());
        if let Some(server) = result.server.as_ref().and_then(|s| s.label()) {
            info!("Measured against server {server}");
        }

        let alert_target = self.settings.alert_target();
        debug!("Alerting enabled: {}", self.settings.alert_enabled());

        let mut report = RunReport {
            result,
            results_post: None,
            assessment: None,
            alert_post: None,
            notify_post: None,
        };

        if let Some(target) = self.settings.result_target() {
            let outcome = self.notifier.post_results(&target, &report.result).await;
            report.results_post = Some(outcome.check()?);
        }

        match self.settings.thresholds().complete() {
            Some(limits) => {
                let assessment = QualityAnalyzer::new(limits).evaluate(&report.result);
                if let (Some(target), true) = (&alert_target, assessment.post_alert) {
                    let outcome = self.notifier.post_alert(target, &assessment.message).await;
                    report.alert_post = Some(outcome.check()?);
                }
                report.assessment = Some(assessment);
            }
            None => debug!("Quality check skipped, not every threshold was supplied"),
        }

        if self.settings.notify {
            if let Some(target) = &alert_target {
                let outcome = self.notifier.post_notify(target, &report.result).await;
                report.notify_post = Some(outcome.check()?);
            }
        }

        Ok(report)
    }
}
