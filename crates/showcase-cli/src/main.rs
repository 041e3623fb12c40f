mod display;

use clap::{Parser, Subcommand};
use showcase_fetch::{Aggregator, DataSource};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "showcase")]
#[command(about = "Game showcase stats aggregator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print player and visit totals across all configured games (default)
    Stats {
        /// Emit the full aggregate as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the featured games (top by current players)
    Featured,
    /// Print every game, optionally filtered by name or description
    Grid {
        /// Case-insensitive search term
        #[arg(long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = showcase_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let source = DataSource::from_config(&config)?;
    tracing::info!(
        source = %source.kind(),
        configured_ids = config.item_ids.len(),
        "starting aggregation pass"
    );
    let aggregator = Aggregator::new(source);

    match cli.command.unwrap_or(Commands::Stats { json: false }) {
        Commands::Stats { json } => {
            let result = aggregator.aggregate(&config.item_ids).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", display::render_stats(&result));
            }
        }
        Commands::Featured => {
            let result = aggregator.aggregate(&config.item_ids).await;
            print!("{}", display::render_featured(result.featured()));
        }
        Commands::Grid { search } => {
            let rendered = match aggregator.try_aggregate(&config.item_ids).await {
                Ok(result) => display::render_grid(&result, search.as_deref().unwrap_or_default()),
                Err(e) => {
                    tracing::error!(error = %e, "failed to load games for the grid");
                    display::render_grid_error()
                }
            };
            print!("{rendered}");
        }
    }

    Ok(())
}
