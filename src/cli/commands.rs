use clap::Parser;
use std::path::PathBuf;

/// Main CLI structure for the speed-watcher application
/// Every flag is optional; a run with no flags only measures and logs
#[derive(Debug, Parser)]
#[command(author = "Kaipo Chen")]
#[command(version)]
#[command(about = "Run an internet speed test and report the results to IFTTT webhooks")]
#[command(long_about = "Runs speedtest-cli, logs the download, upload and latency figures, and \
optionally posts them to IFTTT Maker webhooks. When latency, download and upload thresholds are \
all given, a quality alert is posted to the alert hook if any of them is crossed.\n\n\
Examples:\n  \
sw                                           # Measure and log only\n  \
sw -r speed_results -k KEY                   # Log results to a spreadsheet hook\n  \
sw -a speed_alert -k KEY -l 50 -d 100 -u 20  # Alert on poor quality\n  \
sw -a speed_alert -k KEY -n                  # Always send a summary notification")]
pub struct Cli {
    /// IFTTT maker event that receives the raw results
    #[arg(
        short = 'r',
        long,
        alias = "result_hook_name",
        help = "IFTTT maker event result logger hook name"
    )]
    pub result_hook_name: Option<String>,

    /// IFTTT maker event used for alerts and notify summaries
    #[arg(
        short = 'a',
        long,
        alias = "alert_hook_name",
        help = "IFTTT maker event alerting hook name"
    )]
    pub alert_hook_name: Option<String>,

    /// Secret key shared by the result and alert hooks
    #[arg(
        short = 'k',
        long,
        alias = "hook_secret_key",
        help = "IFTTT maker event secret key"
    )]
    pub hook_secret_key: Option<String>,

    #[arg(
        short = 'u',
        long,
        alias = "upload_threshold",
        allow_negative_numbers = true,
        help = "Alert if upload (Mbps) below threshold"
    )]
    pub upload_threshold: Option<i64>,

    #[arg(
        short = 'd',
        long,
        alias = "download_threshold",
        allow_negative_numbers = true,
        help = "Alert if download (Mbps) below threshold"
    )]
    pub download_threshold: Option<i64>,

    #[arg(
        short = 'l',
        long,
        alias = "latency_threshold",
        allow_negative_numbers = true,
        help = "Alert if latency (ms) above threshold"
    )]
    pub latency_threshold: Option<i64>,

    #[arg(
        short = 's',
        long,
        alias = "speedtest_server_id",
        help = "Preferred speedtest.net server id"
    )]
    pub speedtest_server_id: Option<String>,

    /// Only takes effect when the alert hook and secret key are set
    #[arg(short = 'n', long, help = "Notify IFTTT on current results")]
    pub notify: bool,

    /// Settings file; values are overridden by SPEED_WATCHER_* variables and flags
    #[arg(short = 'c', long, help = "Path to a settings file (toml, yaml, json)")]
    pub config: Option<PathBuf>,
}
