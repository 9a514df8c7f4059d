mod output;
mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tastetrail")]
#[command(about = "Find, enrich and rank restaurants around a point")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the configured providers around a centre point.
    Search {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Search radius in metres.
        #[arg(long, default_value_t = 1000.0)]
        radius: f64,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Re-filter a saved JSON result set to a new centre or radius (no network).
    Filter {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long)]
        radius: f64,
        #[arg(long)]
        json: bool,
    },
    /// Print the cuisine tags for a place name and optional category.
    Classify {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = tastetrail_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Search {
            lat,
            lon,
            radius,
            json,
        }) => search::run_search(&config, lat, lon, radius, json).await?,
        Some(Commands::Filter {
            input,
            lat,
            lon,
            radius,
            json,
        }) => search::run_filter(&input, lat, lon, radius, json)?,
        Some(Commands::Classify { name, category }) => {
            let tags = tastetrail_engine::classify(category.as_deref(), &name);
            println!("{}", tags.join(", "));
        }
        None => println!("tastetrail: pass --help for available commands"),
    }

    Ok(())
}
