use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use speed_watcher::cli::Cli;
use speed_watcher::{logging, RunReport, Runner, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();
    info!("Starting");

    let cli = Cli::parse();

    match run(cli).await {
        Ok(report) => {
            info!(
                "Finished, {} of {} webhook triggers delivered",
                report.webhooks_delivered(),
                report.webhooks_attempted()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Speed test run failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunReport> {
    let settings = Settings::load(cli.config.as_deref())
        .context("Failed to load settings")?
        .apply_cli(&cli);

    Runner::from_settings(settings).run().await
}
