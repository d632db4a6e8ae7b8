//! Refwalk main entry point
//!
//! This is the command-line interface for the refwalk internal link auditor.

use anyhow::Context;
use clap::Parser;
use refwalk::config::{load_config, validate, Config};
use refwalk::crawler::{build_http_client, run_audit};
use refwalk::report::write_report;
use refwalk::AuditError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Refwalk: an internal link auditor
///
/// Refwalk walks a website from a seed address, discovers every same-host
/// page reachable through anchor hyperlinks, then probes each discovered
/// address and reports it as reachable or broken.
#[derive(Parser, Debug)]
#[command(name = "refwalk")]
#[command(version)]
#[command(about = "Audits the internal link structure of a website", long_about = None)]
struct Cli {
    /// Absolute address the audit starts from
    #[arg(value_name = "SEED")]
    seed: String,

    /// Extra positional arguments are ignored with a warning
    #[arg(value_name = "EXTRA", hide = true)]
    extra: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Whole-request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Connection establishment timeout in milliseconds
    #[arg(long, value_name = "MS")]
    connect_timeout_ms: Option<u64>,

    /// Probe requests allowed in flight at once
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Treat addresses differing only in their query string as distinct pages
    #[arg(long)]
    distinct_queries: bool,

    /// File receiving one line per reachable address
    #[arg(long, value_name = "PATH")]
    success_report: Option<String>,

    /// File receiving one line per broken address
    #[arg(long, value_name = "PATH")]
    failure_report: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate input and show what would be audited without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if !cli.extra.is_empty() {
        tracing::warn!(
            "Ignoring {} extra argument(s): {}",
            cli.extra.len(),
            cli.extra.join(" ")
        );
    }

    // Load configuration, then let command-line switches override it
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid settings after command-line overrides")?;

    let seed = parse_seed(&cli.seed)?;

    if cli.dry_run {
        handle_dry_run(&config, &seed);
        return Ok(());
    }

    handle_audit(config, seed).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("refwalk=info,warn"),
            1 => EnvFilter::new("refwalk=debug,info"),
            2 => EnvFilter::new("refwalk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(timeout_ms) = cli.timeout_ms {
        config.crawl.timeout_ms = timeout_ms;
    }
    if let Some(connect_timeout_ms) = cli.connect_timeout_ms {
        config.crawl.connect_timeout_ms = connect_timeout_ms;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawl.concurrency = concurrency;
    }
    if cli.distinct_queries {
        config.crawl.distinct_queries = true;
    }
    if let Some(path) = &cli.success_report {
        config.report.success_path = path.clone();
    }
    if let Some(path) = &cli.failure_report {
        config.report.failure_path = path.clone();
    }
}

/// Parses the seed argument, requiring an absolute http(s) address with a host
fn parse_seed(raw: &str) -> Result<Url, AuditError> {
    let seed = Url::parse(raw).map_err(|e| AuditError::InvalidSeed {
        seed: raw.to_string(),
        reason: e.to_string(),
    })?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(AuditError::InvalidSeed {
            seed: raw.to_string(),
            reason: format!("unsupported scheme '{}'", seed.scheme()),
        });
    }

    if seed.host_str().is_none() {
        return Err(AuditError::MissingHost(raw.to_string()));
    }

    Ok(seed)
}

/// Handles the --dry-run mode: validates input and shows the audit plan
fn handle_dry_run(config: &Config, seed: &Url) {
    println!("=== Refwalk Dry Run ===\n");

    println!("Seed:");
    println!("  Address: {}", seed);
    println!("  Scope host: {}", seed.host_str().unwrap_or("?"));

    println!("\nCrawl:");
    println!("  Timeout: {}ms", config.crawl.timeout_ms);
    println!("  Connect timeout: {}ms", config.crawl.connect_timeout_ms);
    println!("  Probe concurrency: {}", config.crawl.concurrency);
    println!(
        "  Page identity: {}",
        if config.crawl.distinct_queries {
            "path + query"
        } else {
            "path only"
        }
    );

    println!("\nReport:");
    println!("  Valid links: {}", config.report.success_path);
    println!("  Broken links: {}", config.report.failure_path);

    println!("\n✓ Input is valid");
    println!("✓ Would walk {} and probe every discovered page", seed);
}

/// Handles the main audit operation
async fn handle_audit(config: Config, seed: Url) -> anyhow::Result<()> {
    tracing::info!(
        "Auditing {} (scope host: {})",
        seed,
        seed.host_str().unwrap_or("?")
    );

    let client = build_http_client(&config.crawl).context("failed to build HTTP client")?;

    let report = tokio::select! {
        report = run_audit(&client, &seed, &config) => report?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, abandoning audit");
            anyhow::bail!("audit interrupted");
        }
    };

    tracing::info!(
        "Audit finished: {} pages, {} reachable, {} broken",
        report.entries.len(),
        report.success_count(),
        report.failure_count()
    );

    write_report(&report, &config.report)?;

    Ok(())
}
