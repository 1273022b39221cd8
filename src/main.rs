use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod config;
mod models;
mod services;
mod utils;

use api::nasdaq::NasdaqClient;
use api::twilio::TwilioNotifier;
use cli::Cli;
use config::Config;
use services::report_service;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stock_report=debug,reqwest=warn")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        error!("Invalid arguments: {}", e);
        return ExitCode::from(2);
    }

    info!(
        "Report requested for '{}' from {} to {}",
        cli.symbol, cli.start_date, cli.end_date
    );

    let channels = cli.delivery_channels();
    let config = match Config::from_env(&channels) {
        Ok(c) => c,
        Err(e) => {
            error!("==> {}", e);
            return ExitCode::FAILURE;
        }
    };

    let source = NasdaqClient::new(config.nasdaq_api_key);
    let report = match report_service::build_report(&source, &cli.report_request()).await {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to build report: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let message = report_service::format_message(&report);

    if let Some(twilio) = config.twilio {
        let notifier = TwilioNotifier::new(twilio);
        if let Err(e) = report_service::dispatch(&notifier, &channels, &message).await {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    } else {
        info!("Dry run, nothing sent");
    }

    info!("{} ({} daily prices)", message, report.observations);
    ExitCode::SUCCESS
}
