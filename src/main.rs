use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{ConfigCommand, RecipeCommand};
use config::Config;
use recipe_book::{storage, MemoryStorage, Platform, RecipeStore, StorageAdapter};

#[derive(Parser)]
#[command(name = "recipes")]
#[command(version)]
#[command(about = "A personal recipe book", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Keep recipes in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Recipe(RecipeCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_book=warn,recipes=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Recipe(cmd)) => {
            let backend: Arc<dyn StorageAdapter> = if cli.ephemeral {
                Arc::new(MemoryStorage::new())
            } else {
                storage::for_platform(Platform::current(), config.data_dir.value.clone())
            };

            let mut store = RecipeStore::open(backend).await;
            let result = cmd.run(&mut store);

            // Queued writes must land before the process exits
            if cmd.is_write() {
                store.flush().await;
            }
            result?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
