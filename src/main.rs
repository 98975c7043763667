use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

use rs_contacts::apis::RepairShoprApi;
use rs_contacts::app::ports::SnapshotStorePort;
use rs_contacts::config::Config;
use rs_contacts::constants::DEFAULT_CONFIG_PATH;
use rs_contacts::infra::http_client::ReqwestHttp;
use rs_contacts::infra::snapshot_store::JsonSnapshotStore;
use rs_contacts::logging;
use rs_contacts::pipeline::{Pipeline, PipelineOptions, PipelineResult};
use rs_contacts::types::RecordSource;

#[derive(Parser)]
#[command(name = "rs_contacts")]
#[command(about = "Export RepairShopr customers as a FreePBX contact book CSV")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file (config.toml is used when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the CSV output path
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all customers and write the contact book (default)
    Export,
    /// Fetch all customers and save them as a JSON snapshot for inspection
    Dump {
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Build the contact book from a previously saved snapshot
    FromSnapshot {
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
}

fn build_api(config: &Config) -> anyhow::Result<RepairShoprApi> {
    config.validate()?;
    let timeout = Duration::from_secs(config.repairshopr.timeout_seconds);
    let http = ReqwestHttp::new(timeout).context("building HTTP client")?;
    Ok(RepairShoprApi::new(Box::new(http), &config.repairshopr))
}

fn snapshot_store(config: &Config, snapshot: Option<PathBuf>) -> JsonSnapshotStore {
    let path = snapshot.unwrap_or_else(|| PathBuf::from(&config.export.snapshot_path));
    JsonSnapshotStore::new(path, config.repairshopr.subdomain.clone())
}

fn print_summary(result: &PipelineResult) {
    println!("Export from {}:", result.source);
    println!("   Customers fetched: {}", result.total_customers);
    println!("   Customers skipped: {}", result.customers_skipped);
    println!("   Contacts skipped:  {}", result.contacts_skipped);
    println!("   Entries written:   {}", result.entries_written);
    println!("   Output file:       {}", result.output_file);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_required(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::load(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("loading configuration from {}", DEFAULT_CONFIG_PATH))?,
    };
    if let Some(output) = cli.output {
        config.export.output_path = output.display().to_string();
    }
    let options = PipelineOptions::from_config(&config.export);

    match cli.command.unwrap_or(Commands::Export) {
        Commands::Export => {
            let api = build_api(&config)?;
            let result = Pipeline::run(&api, &options).await?;
            print_summary(&result);
        }
        Commands::Dump { snapshot } => {
            let api = build_api(&config)?;
            let store = snapshot_store(&config, snapshot);
            let customers = api.fetch_all().await?;
            store.save(&customers).await?;
            println!("Saved {} customers to {}", customers.len(), store.path().display());
        }
        Commands::FromSnapshot { snapshot } => {
            let store = snapshot_store(&config, snapshot);
            let result = Pipeline::run(&store, &options).await?;
            print_summary(&result);
        }
    }
    Ok(())
}

/// Logs the outcome once and maps it to the process exit status
fn report(outcome: anyhow::Result<()>) -> u8 {
    match outcome {
        Ok(()) => {
            info!("Export finished");
            0
        }
        Err(e) => {
            error!("Export failed: {:#}", e);
            1
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenv::dotenv();
    let _guard = logging::init_logging();

    let cli = Cli::parse();
    ExitCode::from(report(run(cli).await))
}
