//! firmy-scraper - Sequential firmy.cz business directory scraper
//!
//! Reads addresses from a text file, scrapes matching businesses and their
//! contact details, and writes one spreadsheet row per business.

use anyhow::Result;
use clap::Parser;
use firmy_scraper::commands::{Report, ScrapeCommand};
use firmy_scraper::config::{Config, OutputFormat};
use firmy_scraper::export::ExportOutcome;
use firmy_scraper::ScrapeError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "firmy-scraper",
    version,
    about = "Scrape firmy.cz businesses by address into a spreadsheet",
    long_about = "Searches firmy.cz for every address in the input file, follows each listing to its detail page for phone, email and website, and exports the results."
)]
struct Cli {
    /// Address list, one address per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (csv, json)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, env = "FIRMY_PROXY")]
    proxy: Option<String>,

    /// Minimum delay between addresses in milliseconds
    #[arg(long)]
    delay_min: Option<u64>,

    /// Maximum delay between addresses in milliseconds
    #[arg(long)]
    delay_max: Option<u64>,

    /// Also pause after the last address
    #[arg(long)]
    trailing_delay: bool,

    /// Export phone numbers without the leading apostrophe
    #[arg(long)]
    no_phone_marker: bool,

    /// Discard collected results if the run is interrupted
    #[arg(long)]
    no_partial_export: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Applies CLI overrides on top of file and environment configuration.
    fn apply(self, mut config: Config) -> Config {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(proxy) = self.proxy {
            config.proxy = Some(proxy);
        }
        if let Some(min) = self.delay_min {
            config.delay_min_ms = min;
        }
        if let Some(max) = self.delay_max {
            config.delay_max_ms = max;
        }
        if self.trailing_delay {
            config.trailing_delay = true;
        }
        if self.no_phone_marker {
            config.phone_text_marker = false;
        }
        if self.no_partial_export {
            config.export_partial = false;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt().with_env_filter(log_filter(cli.verbose)).with_target(false).init();

    // Load config with layered overrides
    let config = Config::load(cli.config.as_deref())?.with_env();
    let config = cli.apply(config);

    match ScrapeCommand::new(config).execute().await {
        Ok(report) => {
            print_summary(&report);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("{}", failure_message(err));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// `--verbose` forces DEBUG; otherwise `RUST_LOG` wins, falling back to INFO.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(Level::DEBUG.to_string());
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
}

fn print_summary(report: &Report) {
    match &report.export {
        ExportOutcome::Written { path, .. } => {
            println!("\nProcessing Summary:");
            println!("Total addresses processed: {}", report.addresses);
            println!("Total businesses found: {}", report.businesses);
            println!("Results exported to: {}", path.display());
        }
        ExportOutcome::Skipped => {
            println!("\nNo results were found to export");
        }
    }
}

fn failure_message(err: ScrapeError) -> String {
    match err {
        ScrapeError::MissingInput { path } => format!("Error: {} file not found!", path.display()),
        other => format!("{:#}", anyhow::Error::from(other)),
    }
}
