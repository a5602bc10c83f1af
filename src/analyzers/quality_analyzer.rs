// QualityAnalyzer: Connection quality classification
// Compares a speed test result against operator supplied limits and builds
// the alert message describing every limit that was crossed

use log::info;
use std::fmt;

use crate::models::{display_metric, SpeedTestResult};

const UNSTABLE_PREFIX: &str = "Internet was unstable";

/// Operator supplied thresholds, any of which may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Thresholds {
    /// Highest acceptable latency in milliseconds
    pub latency_max_ms: Option<f64>,
    /// Lowest acceptable download rate in Mbps
    pub download_min_mbps: Option<f64>,
    /// Lowest acceptable upload rate in Mbps
    pub upload_min_mbps: Option<f64>,
}

impl Thresholds {
    pub fn new(
        latency_max_ms: Option<f64>,
        download_min_mbps: Option<f64>,
        upload_min_mbps: Option<f64>,
    ) -> Self {
        Self {
            latency_max_ms,
            download_min_mbps,
            upload_min_mbps,
        }
    }

    /// Returns the limits only when all three thresholds are configured.
    /// A partial set disables quality evaluation for the run.
    pub fn complete(&self) -> Option<QualityLimits> {
        Some(QualityLimits {
            latency_max_ms: self.latency_max_ms?,
            download_min_mbps: self.download_min_mbps?,
            upload_min_mbps: self.upload_min_mbps?,
        })
    }
}

/// A complete set of limits the analyzer can evaluate against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityLimits {
    pub latency_max_ms: f64,
    pub download_min_mbps: f64,
    pub upload_min_mbps: f64,
}

/// Metric that can breach a limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Latency,
    Download,
    Upload,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Latency => write!(f, "latency"),
            Metric::Download => write!(f, "download speed"),
            Metric::Upload => write!(f, "upload speed"),
        }
    }
}

/// A single metric that crossed its limit in the unacceptable direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breach {
    pub metric: Metric,
    pub value: f64,
}

impl Breach {
    /// Message fragment appended to the unstable prefix
    pub fn clause(&self) -> String {
        let direction = match self.metric {
            Metric::Latency => "higher",
            Metric::Download | Metric::Upload => "lower",
        };
        format!(
            ", {} of {} is {direction} than threshold",
            self.metric,
            display_metric(self.value)
        )
    }
}

/// Outcome of one quality evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct QualityAssessment {
    /// Whether an alert should be posted
    pub post_alert: bool,
    /// Human readable status, always terminated with a period
    pub message: String,
    /// Breached metrics in latency, download, upload order
    pub breaches: Vec<Breach>,
}

/// Evaluates speed test results against a set of limits
///
/// Every metric is checked on every call; there is no early exit, so the
/// message carries between zero and three clauses.
///
/// ```
/// use speed_watcher::analyzers::{QualityAnalyzer, QualityLimits};
/// use speed_watcher::models::SpeedTestResult;
///
/// let analyzer = QualityAnalyzer::new(QualityLimits {
///     latency_max_ms: 50.0,
///     download_min_mbps: 100.0,
///     upload_min_mbps: 20.0,
/// });
/// let result = SpeedTestResult::from_raw(157_286_400.0, 26_214_400.0, 80.0);
///
/// let assessment = analyzer.evaluate(&result);
/// assert!(assessment.post_alert);
/// assert_eq!(
///     assessment.message,
///     "Internet was unstable, latency of 80.0 is higher than threshold."
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QualityAnalyzer {
    limits: QualityLimits,
}

impl QualityAnalyzer {
    pub fn new(limits: QualityLimits) -> Self {
        Self { limits }
    }

    pub fn evaluate(&self, result: &SpeedTestResult) -> QualityAssessment {
        info!("Checking speed quality");

        let mut breaches = Vec::new();
        if result.latency_ms > self.limits.latency_max_ms {
            breaches.push(Breach {
                metric: Metric::Latency,
                value: result.latency_ms,
            });
        }
        if result.download_mbps < self.limits.download_min_mbps {
            breaches.push(Breach {
                metric: Metric::Download,
                value: result.download_mbps,
            });
        }
        if result.upload_mbps < self.limits.upload_min_mbps {
            breaches.push(Breach {
                metric: Metric::Upload,
                value: result.upload_mbps,
            });
        }

        let mut message = String::from(UNSTABLE_PREFIX);
        for breach in &breaches {
            message.push_str(&breach.clause());
        }
        message.push('.');
        info!("{message}");

        QualityAssessment {
            post_alert: !breaches.is_empty(),
            message,
            breaches,
        }
    }
}
