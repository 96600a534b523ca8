//! DocMap Parse Binary
//!
//! Reads a DocMap, derives its versions and timeline, and writes the
//! `ParseResult` as JSON to stdout. Logs go to stderr.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DOI_RESOLVER_URL`: Base URL for DOI links (default: https://doi.org/)
//! - `BIORXIV_DOI_PREFIX`: DOI prefix labelled "Go to BioRxiv" (default: 10.1101)
//! - `MAX_STEPS`: Upper bound on walked steps (default: unbounded)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin docmap_parse -- docmap.json --pretty
//! curl -s https://example.org/docmap | cargo run --bin docmap_parse -- -
//! ```

use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docmap_kernel::{DocMapParser, ParsePolicyV1, DOCMAP_KERNEL_SCHEMA_VERSION};

/// Derive manuscript versions and a timeline from a DocMap.
#[derive(Debug, Parser)]
#[command(name = "docmap_parse", version)]
struct Cli {
    /// DocMap file to read, or `-` for stdin.
    input: PathBuf,

    /// Pretty-print the result.
    #[arg(long)]
    pretty: bool,

    /// Print only the result fingerprint.
    #[arg(long)]
    fingerprint: bool,
}

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "docmap_parse=info,docmap_kernel=info".into());

    if log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Load the parse policy from environment variables.
fn policy_from_env() -> ParsePolicyV1 {
    let mut policy = ParsePolicyV1::default();
    if let Ok(resolver) = std::env::var("DOI_RESOLVER_URL") {
        if !resolver.is_empty() {
            policy.doi_resolver = resolver;
        }
    }
    if let Ok(prefix) = std::env::var("BIORXIV_DOI_PREFIX") {
        if !prefix.is_empty() {
            policy.biorxiv_doi_prefix = prefix;
        }
    }
    policy.max_steps = std::env::var("MAX_STEPS").ok().and_then(|s| s.parse().ok());
    policy
}

fn read_input(input: &PathBuf) -> std::io::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(input)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    let parser = DocMapParser::new(policy_from_env());
    info!(
        version = env!("CARGO_PKG_VERSION"),
        schema_version = DOCMAP_KERNEL_SCHEMA_VERSION,
        policy = parser.policy().policy_id(),
        params_hash = %parser.policy().params_hash(),
        "Starting DocMap parse"
    );

    let text = read_input(&cli.input).map_err(|e| {
        tracing::error!(error = %e, input = %cli.input.display(), "Failed to read DocMap");
        e
    })?;

    let start = Instant::now();
    let result = parser.parse_str(&text).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse DocMap");
        e
    })?;

    info!(
        versions = result.versions.len(),
        timeline_events = result.timeline.len(),
        fingerprint = %result.fingerprint(),
        latency_ms = start.elapsed().as_millis() as u64,
        "DocMap parsed"
    );

    if cli.fingerprint {
        println!("{}", result.fingerprint());
    } else if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(())
}
