use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mealflo_shopping::ListOrder;

/// mealflo - Weekly meal planning and shopping lists
#[derive(Parser)]
#[command(name = "mealflo")]
#[command(about = "Plan a week of meals and get one shopping list for it", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the shopping list for a week snapshot file
    Aggregate {
        /// Week snapshot (JSON)
        file: PathBuf,

        /// Item order: first-seen or alphabetical (overrides config file)
        #[arg(long)]
        order: Option<ListOrder>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealflo::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealflo::observability::init_observability(
        "mealflo",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        &config.observability.log_format,
    )?;

    match cli.command {
        Commands::Serve { host, port } => mealflo::cli::server::serve(config, host, port).await,
        Commands::Aggregate { file, order } => {
            mealflo::cli::aggregate::run(config, &file, order).await
        }
    }
}
