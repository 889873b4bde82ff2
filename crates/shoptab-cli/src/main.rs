use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shoptab_client::{Credentials, RealtimeClient};
use shoptab_core::export::cell_to_string;
use shoptab_core::{ContextFilter, ExportService, QueryConfig, RunSummary, Source};

#[derive(Parser)]
#[command(name = "shoptab", version, about = "Google Shopping data exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export Google Shopping search results to CSV and JSON
    Search {
        /// Search query (e.g. "levis")
        #[arg(short, long)]
        query: String,

        /// Google domain to target
        #[arg(short, long, default_value = "com")]
        domain: String,

        /// Number of result pages to request
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Sort order context filter (e.g. "pd" for price descending)
        #[arg(long)]
        sort_by: Option<String>,

        /// Minimum price context filter
        #[arg(long)]
        min_price: Option<String>,

        /// Additional context filters as key=value pairs
        #[arg(long = "context")]
        context: Vec<String>,

        /// CSV output path
        #[arg(long, default_value = "google_shopping_search.csv")]
        csv: PathBuf,

        /// JSON output path
        #[arg(long, default_value = "google_shopping_search.json")]
        json: PathBuf,

        /// API username (reads from OXYLABS_USERNAME env var if not provided)
        #[arg(short, long, env = "OXYLABS_USERNAME")]
        username: String,

        /// API password (reads from OXYLABS_PASSWORD env var if not provided)
        #[arg(long, env = "OXYLABS_PASSWORD")]
        password: String,

        /// API endpoint override (e.g. a local stub server)
        #[arg(long, env = "SHOPTAB_ENDPOINT")]
        endpoint: Option<String>,
    },

    /// Export a single product's details to CSV and JSON
    Product {
        /// Google Shopping product ID
        #[arg(short, long)]
        product_id: String,

        /// Google domain to target
        #[arg(short, long, default_value = "com")]
        domain: String,

        /// CSV output path
        #[arg(long, default_value = "google_shopping_product.csv")]
        csv: PathBuf,

        /// JSON output path
        #[arg(long, default_value = "google_shopping_product.json")]
        json: PathBuf,

        /// API username (reads from OXYLABS_USERNAME env var if not provided)
        #[arg(short, long, env = "OXYLABS_USERNAME")]
        username: String,

        /// API password (reads from OXYLABS_PASSWORD env var if not provided)
        #[arg(long, env = "OXYLABS_PASSWORD")]
        password: String,

        /// API endpoint override (e.g. a local stub server)
        #[arg(long, env = "SHOPTAB_ENDPOINT")]
        endpoint: Option<String>,
    },

    /// Export a product's seller offers to CSV and JSON
    Pricing {
        /// Google Shopping product ID
        #[arg(short, long)]
        product_id: String,

        /// Google domain to target
        #[arg(short, long, default_value = "com")]
        domain: String,

        /// CSV output path
        #[arg(long, default_value = "google_shopping_pricing.csv")]
        csv: PathBuf,

        /// JSON output path
        #[arg(long, default_value = "google_shopping_pricing.json")]
        json: PathBuf,

        /// API username (reads from OXYLABS_USERNAME env var if not provided)
        #[arg(short, long, env = "OXYLABS_USERNAME")]
        username: String,

        /// API password (reads from OXYLABS_PASSWORD env var if not provided)
        #[arg(long, env = "OXYLABS_PASSWORD")]
        password: String,

        /// API endpoint override (e.g. a local stub server)
        #[arg(long, env = "SHOPTAB_ENDPOINT")]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("shoptab=info".parse()?)
                .add_directive("shoptab_core=info".parse()?)
                .add_directive("shoptab_client=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            domain,
            pages,
            sort_by,
            min_price,
            context,
            csv,
            json,
            username,
            password,
            endpoint,
        } => {
            let mut config = QueryConfig::new(Source::Search, query)
                .with_domain(domain)
                .with_pages(pages);
            if let Some(sort_by) = sort_by {
                config = config.with_context(ContextFilter::new("sort_by", sort_by));
            }
            if let Some(min_price) = min_price {
                let filter = ContextFilter::parse(&format!("min_price={min_price}"))?;
                config = config.with_context(filter);
            }
            for pair in &context {
                let filter = ContextFilter::parse(pair)
                    .with_context(|| format!("Invalid --context pair: {pair}"))?;
                config = config.with_context(filter);
            }

            run_export(&config, &csv, &json, username, password, endpoint).await?;
        }
        Commands::Product {
            product_id,
            domain,
            csv,
            json,
            username,
            password,
            endpoint,
        } => {
            let config = QueryConfig::new(Source::Product, product_id).with_domain(domain);
            let summary = run_export(&config, &csv, &json, username, password, endpoint).await?;
            print_product(&summary);
        }
        Commands::Pricing {
            product_id,
            domain,
            csv,
            json,
            username,
            password,
            endpoint,
        } => {
            let config = QueryConfig::new(Source::Pricing, product_id).with_domain(domain);
            run_export(&config, &csv, &json, username, password, endpoint).await?;
        }
    }

    Ok(())
}

/// Build the client and run the query → extract → export pipeline once.
async fn run_export(
    config: &QueryConfig,
    csv: &std::path::Path,
    json: &std::path::Path,
    username: String,
    password: String,
    endpoint: Option<String>,
) -> Result<RunSummary> {
    let mut client = RealtimeClient::new(Credentials::new(username, password))
        .context("Failed to create API client")?;
    if let Some(endpoint) = endpoint {
        client = client.with_endpoint(&endpoint)?;
    }

    let service = ExportService::new(client);
    let summary = service
        .run(config, csv, json)
        .await
        .with_context(|| format!("{} export failed", config.source.mode()))?;

    Ok(summary)
}

/// Echo the extracted product fields to stdout.
fn print_product(summary: &RunSummary) {
    let Some(row) = summary.table.rows().first() else {
        return;
    };

    println!("Product Name: {}", cell_to_string(&row[0]));
    println!("Product Details: {}", cell_to_string(&row[1]));
    println!("Product Highlights: {}", cell_to_string(&row[2]));
    println!("Product Rating: {}", cell_to_string(&row[3]));
    println!("Reviews Count: {}", cell_to_string(&row[4]));
}
