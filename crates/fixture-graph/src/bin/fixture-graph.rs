//! Generate a synthetic dataset and export it as CSV/JSON.
//!
//! Run with:
//! ```
//! cargo run -p fixture-graph -- --n-customers 500 --output-dir ./output
//! ```

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use fixture_graph::builders::DatasetBuilder;
use fixture_graph::config::GenerationConfig;
use fixture_graph::export::Exporter;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fixture-graph")]
#[command(version, about = "Synthetic customer/account/transaction graph generator", long_about = None)]
struct Cli {
    /// Industry template (banking, insurance, telco, retail, ...)
    #[arg(long, default_value = "banking")]
    industry: String,

    #[arg(long, default_value_t = 500)]
    n_customers: usize,

    #[arg(long, default_value_t = 100)]
    n_companies: usize,

    /// Minimum accounts per customer
    #[arg(long, default_value_t = 1)]
    min_accounts: usize,

    /// Maximum accounts per customer
    #[arg(long, default_value_t = 3)]
    max_accounts: usize,

    #[arg(long, default_value_t = 10_000)]
    n_transactions: usize,

    /// Disable fraud/anomaly injection
    #[arg(long)]
    no_fraud: bool,

    /// Random seed for reproducible output
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Reference time for trailing windows (RFC 3339); defaults to today at midnight UTC
    #[arg(long, value_parser = parse_rfc3339)]
    as_of: Option<OffsetDateTime>,

    /// Output directory for exported tables
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,
}

fn parse_rfc3339(value: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| format!("invalid RFC 3339 time: {e}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.min_accounts > cli.max_accounts {
        bail!(
            "--min-accounts ({}) must not exceed --max-accounts ({})",
            cli.min_accounts,
            cli.max_accounts
        );
    }

    let config = GenerationConfig {
        industry: cli.industry,
        n_customers: cli.n_customers,
        n_companies: cli.n_companies,
        accounts_per_customer: (cli.min_accounts, cli.max_accounts),
        n_transactions: cli.n_transactions,
        include_fraud: !cli.no_fraud,
        random_seed: Some(cli.seed),
        as_of: cli.as_of,
        ..Default::default()
    };

    let dataset = DatasetBuilder::from_config(config)
        .with_metrics(true)
        .build();

    let exporter = Exporter::new(&cli.output_dir)
        .with_context(|| format!("Failed to create {}", cli.output_dir.display()))?;
    let paths = exporter
        .export_dataset(&dataset)
        .context("Failed to export dataset")?;

    // Summary output
    tracing::info!("Generation completed!");
    if let Some(metrics) = &dataset.metrics {
        tracing::info!("  Customers: {}", metrics.customer_count);
        tracing::info!("  Companies: {}", metrics.company_count);
        tracing::info!("  Accounts: {}", metrics.account_count);
        tracing::info!("  Transactions: {}", metrics.transaction_count);
        tracing::info!("  Edges: {}", metrics.edge_count);
        tracing::info!("  Duplicate customers: {}", metrics.duplicate_customer_count);
        tracing::info!("  Fraud ring transactions: {}", metrics.fraud_transaction_count);
        tracing::info!("  Generation time: {} ms", metrics.generation_time_ms);
    }
    tracing::info!(
        "Wrote {} files to {}",
        paths.len(),
        exporter.output_dir().display()
    );

    Ok(())
}
