//! hwinv daemon - firmware-relevant hardware inventory.
//!
//! Runs one discovery pass over the host's buses and metadata sources and
//! prints the resulting inventory snapshot as JSON for the service façade.

use anyhow::Result;
use clap::Parser;
use hwinvd::aggregator;
use hwinvd::config::{DiscoveryConfig, CONFIG_PATH};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "hwinvd")]
#[command(about = "Firmware-relevant hardware inventory daemon", version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = CONFIG_PATH)]
    config: String,

    /// Pretty-print the JSON snapshot
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    info!("hwinvd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = DiscoveryConfig::load(&cli.config);
    let inventory = aggregator::run(&config).await;

    let snapshot = if cli.pretty {
        serde_json::to_string_pretty(&inventory)?
    } else {
        serde_json::to_string(&inventory)?
    };
    println!("{}", snapshot);

    Ok(())
}
