use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs;
use std::path::PathBuf;

use sign_fetcher::cli::Cli;
use sign_fetcher::{DropboxSignClient, Fetcher, FetcherConfig};

fn log_file_path() -> Result<PathBuf> {
    let log_dir = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Failed to get base directories"))?
        .data_local_dir()
        .join("sign-fetcher")
        .join("logs");

    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

    Ok(log_dir.join(format!(
        "fetcher_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )))
}

fn setup_logging() -> Result<()> {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Debug)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let file_logger = log_file_path().and_then(|path| {
        let file = fs::File::create(&path)
            .with_context(|| format!("Failed to create log file {:?}", path))?;
        Ok((path, file))
    });

    let log_path = match file_logger {
        Ok((path, file)) => {
            loggers.push(WriteLogger::new(LevelFilter::Info, config, file));
            Some(path)
        }
        Err(e) => {
            eprintln!("file logging disabled: {:#}", e);
            None
        }
    };

    CombinedLogger::init(loggers).context("Failed to initialize logging")?;

    if let Some(path) = log_path {
        info!("Writing log to {:?}", path);
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging()?;

    info!("sign-fetcher starting");

    let config = FetcherConfig::default();
    config.validate()?;
    info!("Output directory: {:?}", config.output_dir);

    let client = DropboxSignClient::new(cli.api_key).context("Failed to build API client")?;
    let fetcher = Fetcher::new(client, config);

    match fetcher.run() {
        Ok(report) => {
            if report.failed > 0 {
                warn!(
                    "{} of {} downloads failed, see {:?}",
                    report.failed,
                    report.attempted,
                    fetcher.config().failure_log
                );
            }
            if report.failures_logged < report.failed {
                warn!(
                    "{} failures could not be written to the failure log",
                    report.failed - report.failures_logged
                );
            }
            info!("Downloaded {} documents", report.downloaded);
            Ok(())
        }
        Err(e) => {
            error!("Fetch run aborted: {}", e);
            std::process::exit(1);
        }
    }
}
