use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use stockout_forecast::{
    DataLoader, ForecastConfig, InventoryReport, InventoryStore, MemoryStore,
};
use tracing_subscriber::EnvFilter;

/// Forecast burn rate and runway for every inventory item
#[derive(Debug, Parser)]
#[command(name = "stockout_report", version)]
struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Inventory CSV; demo data is generated when omitted
    #[arg(long, requires = "sales")]
    inventory: Option<PathBuf>,

    /// Sales history CSV
    #[arg(long, requires = "inventory")]
    sales: Option<PathBuf>,

    /// Seed for demo data
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stockout_forecast=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ForecastConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let now = Local::now().naive_local();

    let store = match (&cli.inventory, &cli.sales) {
        (Some(inventory), Some(sales)) => MemoryStore::with_records(
            DataLoader::inventory_from_csv(inventory)
                .with_context(|| format!("failed to read {}", inventory.display()))?,
            DataLoader::sales_from_csv(sales)
                .with_context(|| format!("failed to read {}", sales.display()))?,
        ),
        _ => {
            let mut rng = StdRng::seed_from_u64(cli.seed);
            MemoryStore::with_mock_data(&mut rng, now.date())?
        }
    };

    let report = InventoryReport::build(&store.items()?, &store.sales()?, now, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
