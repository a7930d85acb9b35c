use clap::Parser;
use img_harvest::{Harvest, PageSource};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; the run summary is logged at info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();
    let source = args.source();

    if let PageSource::Web(_) = &source {
        ::log::info!("Reading images through WebDriver (set WEBDRIVER_URL to override the endpoint)");
    }

    let mut harvest = Harvest::new(source);
    if let Some(path) = &args.config {
        harvest = match harvest.with_config_file(path) {
            Ok(harvest) => harvest,
            Err(e) => {
                ::log::error!("Failed to load configuration: {}", e);
                return ExitCode::FAILURE;
            }
        };
    }

    // Command-line flags win over the configuration file
    if let Some(dir) = &args.output {
        harvest = harvest.with_output_dir(dir);
    }
    if let Some(min_height) = args.min_height {
        harvest = harvest.with_min_height(min_height);
    }
    if let Some(settle) = args.settle {
        harvest = harvest.with_settle(settle);
    }
    if let Some(policy) = args.missing_filename {
        harvest = harvest.with_missing_filename(policy.into());
    }
    if args.no_status_check {
        harvest = harvest.with_status_check(false);
    }
    if let Some(timeout) = args.timeout {
        harvest = harvest.with_request_timeout(timeout);
    }

    ::log::info!("Starting harvest of {}", args.page);
    let start_time = std::time::Instant::now();

    let report = match harvest.run().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Harvest failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Harvest complete in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                ::log::error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
