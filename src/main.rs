//! Sentinel CLI
//!
//! Usage:
//!   sentinel                                   # Render the dashboard
//!   sentinel --rhi 1.35 --ibs 0.78 --msr 2.8   # Score one reading
//!   sentinel --check                           # Validate the snapshot source
//!   sentinel --serve                           # HTTP API server
//!   sentinel --json                            # JSON output

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Timelike;
use clap::Parser;
use serde::Serialize;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sentinel::config::{SentinelConfig, DEFAULT_LOG_FILTER};
use sentinel::core::{
    level_badge, render_dashboard, run_server, validate_snapshot, BubblePressureScorer, Dashboard,
};
use sentinel::types::SentimentReading;
use sentinel::{DEFAULT_ADDR, DEFAULT_SOURCE, DEFAULT_TIMEOUT_MS, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "sentinel",
    version = VERSION,
    about = "AI Speculation Sentinel - bubble pressure from retail, institutional and media sentiment",
    long_about = "Sentinel combines three sentiment indicators into a 0-100 bubble pressure score.\n\n\
                  Indicators:\n  \
                  RHI  Retail Heat Index (saturates at 3.0, weight 30%)\n  \
                  IBS  Institutional Bullish Skew (saturates at 0.85, weight 40%)\n  \
                  MSR  Media Sentiment Ratio (saturates at 5.0, weight 30%)\n\n\
                  Levels:\n  \
                  SAFE     pressure < 40\n  \
                  WARNING  40 <= pressure < 70\n  \
                  DANGER   pressure >= 70"
)]
struct Args {
    /// Retail Heat Index to score
    #[arg(long, allow_negative_numbers = true, requires_all = ["ibs", "msr"])]
    rhi: Option<f64>,

    /// Institutional Bullish Skew to score
    #[arg(long, allow_negative_numbers = true, requires_all = ["rhi", "msr"])]
    ibs: Option<f64>,

    /// Media Sentiment Ratio to score
    #[arg(long, allow_negative_numbers = true, requires_all = ["rhi", "ibs"])]
    msr: Option<f64>,

    /// Snapshot file path or http(s) URL
    #[arg(long, env = "SENTINEL_SOURCE", default_value = DEFAULT_SOURCE)]
    source: String,

    /// HTTP fetch timeout in milliseconds
    #[arg(long, env = "SENTINEL_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Validate the snapshot source instead of rendering it
    #[arg(long)]
    check: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, env = "SENTINEL_ADDR", default_value = DEFAULT_ADDR)]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show descriptions and the recomputed score
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = SentinelConfig::new(&args.source, args.timeout_ms, &args.addr);

    if args.serve {
        run_serve(&config).await
    } else if let (Some(rhi), Some(ibs), Some(msr)) = (args.rhi, args.ibs, args.msr) {
        run_score(SentimentReading::new(rhi, ibs, msr), &args)
    } else if args.check {
        run_check(&config, &args).await
    } else {
        run_dashboard(&config, &args).await
    }
}

/// Logs go to stderr so `--json` output stays parseable
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Score a single reading
fn run_score(reading: SentimentReading, args: &Args) -> ExitCode {
    let pressure = BubblePressureScorer::new().score(&reading);

    if args.json {
        return print_json(&pressure);
    }
    if args.no_color {
        println!("{}", pressure.to_parseable_string());
    } else {
        println!("{}", pressure.to_terminal_string());
        println!("  {}", level_badge(pressure.level));
    }
    ExitCode::SUCCESS
}

/// Load, assemble and print the dashboard
async fn run_dashboard(config: &SentinelConfig, args: &Args) -> ExitCode {
    let loader = config.loader();
    let cache = config.cache();
    let snapshot = loader.load(&cache).await;
    let dashboard = Dashboard::build(&snapshot, chrono::Local::now().hour());

    if args.json {
        return print_json(&dashboard);
    }
    println!("{}", render_dashboard(&dashboard, args.verbose));
    ExitCode::SUCCESS
}

/// Strict load + validation; non-zero exit on any finding
async fn run_check(config: &SentinelConfig, args: &Args) -> ExitCode {
    let loader = config.loader();
    let snapshot = match loader.fetch_strict().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("{}: {} ({})", config.source, e, e.reason().code());
            return ExitCode::FAILURE;
        }
    };

    let issues = validate_snapshot(&snapshot);
    if args.json {
        print_json(&issues);
    } else if issues.is_empty() {
        println!("{}: ok", config.source);
    } else {
        for issue in &issues {
            println!("{}: {}", config.source, issue);
        }
    }

    if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Run HTTP API server
async fn run_serve(config: &SentinelConfig) -> ExitCode {
    let cache = Arc::new(config.cache());
    if let Err(e) = run_server(&config.addr, config.loader(), cache).await {
        error!(error = %e, "server error");
        eprintln!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to serialize output");
            ExitCode::FAILURE
        }
    }
}
