use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobsnitch::config::Config;
use jobsnitch::crawler::{Pipeline, Verification};
use jobsnitch::notifications::{self, announce, run_status_message, start_message};
use jobsnitch::storage::SqliteJobStore;

/// Exit code reported when the post-run verification fails
const VERIFICATION_FAILED: i32 = 2;

#[derive(Parser)]
#[command(
    name = "jobsnitch",
    version,
    about = "TopCV IT job-posting crawler with variant-aware extraction",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file; environment variables are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan listing pages for recently posted jobs
    Discover {
        /// Listing pages to scan
        #[arg(short, long)]
        max_pages: Option<u32>,

        /// Write the URLs as a JSON array instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scrape and store the URLs in a JSON array file
    Scrape {
        /// File produced by `discover --output`
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Check that the store holds at least the expected recent records
    Verify {
        /// Records the preceding scrape reported inserting
        #[arg(short, long)]
        expected: u64,
    },

    /// Discover, scrape and verify in one go
    Run {
        /// Listing pages to scan
        #[arg(short, long)]
        max_pages: Option<u32>,
    },

    /// Classify and extract a single URL, printing the record without storing it
    Inspect {
        /// Detail page URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting jobsnitch");

    let store = Arc::new(
        SqliteJobStore::new(&config.storage.sqlite_path).with_context(|| {
            format!(
                "Failed to open job store at {}",
                config.storage.sqlite_path.display()
            )
        })?,
    );
    let pipeline = Pipeline::new(&config, store)?;

    match cli.command {
        Commands::Discover { max_pages, output } => {
            let max_pages = max_pages.unwrap_or(config.crawler.max_pages);
            tracing::info!(max_pages, output = ?output, "Starting discover command");
            let urls = pipeline.discover(max_pages).await;
            write_urls(&urls, output.as_deref())?;
        }

        Commands::Scrape { input } => {
            tracing::info!(input = %input.display(), "Starting scrape command");
            let urls = read_urls(&input)?;
            let report = pipeline.scrape_all(&urls).await;
            println!("{}", report.inserted);
        }

        Commands::Verify { expected } => {
            tracing::info!(expected, "Starting verify command");
            let verification = pipeline.verify(expected)?;
            println!("{}", serde_json::to_string_pretty(&verification)?);
            exit_on_failure(&verification);
        }

        Commands::Run { max_pages } => {
            let max_pages = max_pages.unwrap_or(config.crawler.max_pages);
            tracing::info!(max_pages, "Starting run command");

            let notifiers =
                notifications::from_config(&config.notifications, config.request_timeout());
            announce(&notifiers, &start_message(max_pages)).await;

            let summary = pipeline.run(max_pages).await?;
            announce(&notifiers, &run_status_message(&summary)).await;

            println!("{}", serde_json::to_string_pretty(&summary)?);
            exit_on_failure(&summary.verification);
        }

        Commands::Inspect { url } => {
            tracing::info!(url = %url, "Starting inspect command");
            let record = pipeline.inspect(&url).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    tracing::info!("jobsnitch completed successfully");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("jobsnitch=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!("jobsnitch={level},warn"))
        })
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

fn write_urls(urls: &[String], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, serde_json::to_string_pretty(urls)?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(count = urls.len(), path = %path.display(), "Wrote discovered URLs");
        }
        None => {
            for url in urls {
                println!("{url}");
            }
        }
    }
    Ok(())
}

fn read_urls(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL list: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("URL list is not a JSON array of strings: {}", path.display()))
}

fn exit_on_failure(verification: &Verification) {
    if !verification.passed {
        tracing::warn!(
            expected = verification.expected,
            observed = verification.observed,
            "Exiting with verification failure"
        );
        std::process::exit(VERIFICATION_FAILED);
    }
}
