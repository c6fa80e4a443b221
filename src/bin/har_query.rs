//! Command-line front end for the HAR analyzer.
//!
//! Loads a trace, applies the requested filter, search and sort, and prints
//! one summary line per matching transaction. With `--detail N` the full
//! details of the N-th listed transaction (0-based) are printed as well.
//!
//! Logging goes to stderr and honors `RUST_LOG`; `-v` raises the default
//! level to debug.

use anyhow::{bail, Context, Result};
use clap::Parser;
use har_analyzer::config::{load_config_file, AnalyzerConfig};
use har_analyzer::formatter::{render_details, summary_line};
use har_analyzer::models::{ContentCategory, StatusClass};
use har_analyzer::query::{FilterConfig, QuerySession};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "har-query")]
#[command(about = "Filter, search and sort the transactions of a HAR trace", long_about = None)]
struct Cli {
    /// HAR file to analyze
    file: PathBuf,

    /// Include only this method (repeatable; defaults to the configured methods)
    #[arg(short, long = "method", value_name = "METHOD")]
    methods: Vec<String>,

    /// Include only this status class: 2xx, 3xx, 4xx or 5xx (repeatable)
    #[arg(short, long = "status", value_name = "CLASS")]
    statuses: Vec<String>,

    /// Include only this content type: html, css, js, json, image or other (repeatable)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Case-insensitive search term
    #[arg(long)]
    search: Option<String>,

    /// Sort key: time, url, status, size or duration
    #[arg(long)]
    sort: Option<String>,

    /// Print the details of the N-th listed transaction (0-based)
    #[arg(short, long, value_name = "N")]
    detail: Option<usize>,

    /// JSON settings file with a "har-analyzer" section
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &cli.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    let content = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let mut session = QuerySession::new(&config);
    session
        .load_str(&content)
        .with_context(|| format!("Failed to parse {}", cli.file.display()))?;

    let filter = build_filter(&cli, &config)?;
    session.set_filter(filter);

    if let Some(name) = &cli.sort {
        if !session.set_sort_by_name(name) {
            warn!(
                "Unknown sort key '{}', keeping current order \
                 (expected one of: time, url, status, size, duration)",
                name
            );
        }
    }

    for (index, transaction) in session.transactions().enumerate() {
        println!("{:>4}  {}", index, summary_line(transaction));
    }
    println!(
        "\n{} of {} transactions shown",
        session.len(),
        session.total_count()
    );

    if let Some(index) = cli.detail {
        let listed = session.len();
        let Some(transaction) = session.select(index) else {
            bail!("No transaction at position {} ({} listed)", index, listed);
        };
        println!("\n{}", render_details(transaction, &config));
    }

    info!("Done");
    Ok(())
}

/// Builds the filter from the configured defaults, replacing each dimension
/// the command line names explicitly.
fn build_filter(cli: &Cli, config: &AnalyzerConfig) -> Result<FilterConfig> {
    let mut filter = FilterConfig::from_config(config);

    if !cli.methods.is_empty() {
        filter.methods = cli.methods.iter().cloned().collect();
    }

    if !cli.statuses.is_empty() {
        filter.status_classes = cli
            .statuses
            .iter()
            .map(|label| {
                StatusClass::parse(label)
                    .with_context(|| format!("Unknown status class '{}'", label))
            })
            .collect::<Result<_>>()?;
    }

    if !cli.types.is_empty() {
        filter.content_categories = cli
            .types
            .iter()
            .map(|name| {
                ContentCategory::parse(name)
                    .with_context(|| format!("Unknown content type '{}'", name))
            })
            .collect::<Result<_>>()?;
    }

    if let Some(term) = &cli.search {
        filter.set_search(term);
    }

    Ok(filter)
}
