//! Market results service entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use market_results::api::{self, AppState, NO_DATA_MESSAGE};
use market_results::config::Config;
use market_results::market::{self, classify, Clock, SystemClock};
use market_results::metrics;
use market_results::scrape::ResultsScraper;
use market_results::ServiceError;

/// Daily market results scraper and JSON API.
#[derive(Parser, Debug)]
#[command(name = "market-results")]
#[command(about = "Scrapes daily market results and serves them as a time-redacted JSON API")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the results API (default).
    Serve {
        /// HTTP server port, overriding PORT.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Scrape once and print the JSON the API would return.
    Scrape,

    /// List known markets and their current window state.
    Markets,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Reads .env first, so RUST_LOG set there reaches the log filter
    let loaded = Config::load_validated();

    // Initialize logging
    let filter = match (&loaded, args.verbose) {
        (_, true) => EnvFilter::new("market_results=debug,info"),
        (Ok(config), false) => config.log_filter(),
        (Err(_), false) => EnvFilter::new("info"),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }

    // Handle subcommands; check-config reports load failures itself
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Serve { port }) => Ok(cmd_serve(startup(loaded)?, port).await?),
        Some(Command::Scrape) => cmd_scrape(startup(loaded)?).await,
        Some(Command::Markets) => {
            cmd_markets(startup(loaded)?);
            Ok(())
        }
        None => Ok(cmd_serve(startup(loaded)?, None).await?),
    }
}

/// Check the loaded configuration and the market table, logging failures.
fn startup(loaded: market_results::Result<Config>) -> market_results::Result<Config> {
    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let count = market::check_table().map_err(|e| {
        error!("Market table is malformed: {}", e);
        ServiceError::from(e)
    })?;
    info!(markets = count, "Market table loaded");

    Ok(config)
}

/// Run the results API until shutdown.
async fn cmd_serve(mut config: Config, port_override: Option<u16>) -> market_results::Result<()> {
    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    info!("Configuration loaded successfully");
    info!("Source: {}", config.source_url);
    info!("Fetch timeout: {}s", config.http_timeout_secs);
    if config.dedupe_results {
        info!("Repeated markets will be dropped");
    }

    let mut app_state = AppState::from_config(&config)?;

    if config.metrics_enabled {
        if let Some(handle) = metrics::install_recorder() {
            app_state = app_state.with_metrics(handle);
        }
    }

    // Start HTTP server
    let listener = api::bind(SocketAddr::from(([0, 0, 0, 0], config.port))).await?;
    api::serve(listener, app_state).await
}

/// Scrape once and print the response body the API would send.
async fn cmd_scrape(config: Config) -> anyhow::Result<()> {
    let scraper = ResultsScraper::new(&config).map_err(ServiceError::from)?;

    let entries = scraper.scrape().await;
    if entries.is_empty() {
        println!("{}", serde_json::json!({ "error": NO_DATA_MESSAGE }));
        return Err(anyhow::anyhow!("No data scraped"));
    }

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

/// Print the market table with each market's current state.
fn cmd_markets(config: Config) {
    let clock = config
        .market_utc_offset_minutes
        .and_then(SystemClock::with_offset_minutes)
        .unwrap_or_else(SystemClock::local);
    let now = clock.now();

    println!("======================================================================");
    println!("MARKETS AT {}", now.format("%Y-%m-%d %I:%M %p"));
    println!("======================================================================");
    println!("{:<16} {:<10} {:<10} {}", "MARKET", "OPEN", "CLOSE", "STATE");
    println!("----------------------------------------------------------------------");

    for market in market::markets() {
        println!(
            "{:<16} {:<10} {:<10} {}",
            market.name,
            market.open_str(),
            market.close_str(),
            classify(now, market)
        );
    }

    println!("======================================================================");
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("MARKET RESULTS - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
        }
    }

    print!("Checking market table... ");
    match market::check_table() {
        Ok(count) => println!("OK ({} markets)", count),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Market table check failed: {}", e));
        }
    }

    println!("\nConfiguration:");
    println!("  Port: {}", config.port);
    println!("  Source URL: {}", config.source_url);
    println!("  Fetch timeout: {}s", config.http_timeout_secs);
    match config.market_utc_offset_minutes {
        Some(offset) => println!("  Market UTC offset: {} minutes", offset),
        None => println!("  Market UTC offset: server local time"),
    }
    println!("  Dedupe results: {}", config.dedupe_results);
    println!("  Metrics enabled: {}", config.metrics_enabled);
    println!("  Log filter: {}", config.log_filter());
    println!("======================================================================");

    Ok(())
}
