use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod scrape;
mod server;
mod shell;
mod web;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "rfp", version, about = "Recipe store server and console for the RFP3 format")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, global = true, default_value = "rfp.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API server over the recipe directory.
    Serve {
        /// Override the configured API port.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Serve the static frontend and proxy /api to the API server.
    Web {
        /// Override the configured web port.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Interactive console over the same store.
    Shell,
    /// List stored recipes.
    List,
    /// Print one recipe as JSON.
    Show { id: String },
    /// Delete recipes by identifier.
    Delete { ids: Vec<String> },
    /// Scrape a recipe from a supported site and print it as JSON.
    Scrape {
        url: String,
        /// Also save the scraped recipe into the store.
        #[arg(long)]
        save: bool,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Write a default configuration file and create its directories.
    Init,
    /// Print the effective configuration.
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load_or_default(&args.config)?;

    match args.command {
        Command::Serve { port } => {
            let config = Config {
                api_port: port.unwrap_or(config.api_port),
                ..config
            };
            server::serve(config).await
        }
        Command::Web { port } => {
            let config = Config {
                web_port: port.unwrap_or(config.web_port),
                ..config
            };
            web::serve(config).await
        }
        Command::Shell => shell::run(config, &args.config).await,
        Command::List => {
            for entry in config.store().list()? {
                println!("{}\t{}", entry.id, entry.name);
            }
            Ok(())
        }
        Command::Show { id } => {
            let recipe = config.store().get(&id)?;
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(())
        }
        Command::Delete { ids } => {
            anyhow::ensure!(!ids.is_empty(), "specify at least one recipe id");
            let store = config.store();
            for id in ids {
                store.delete(&id)?;
                println!("deleted {id}");
            }
            Ok(())
        }
        Command::Scrape { url, save } => {
            let recipe = scrape::scrape(&url, &config.image_dir).await?;
            if save {
                let id = config.store().put(&recipe)?;
                tracing::info!(id, "saved scraped recipe");
            }
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(())
        }
        Command::Config { action } => match action {
            ConfigAction::Init => {
                config.save(&args.config)?;
                println!("wrote {}", args.config.display());
                Ok(())
            }
            ConfigAction::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
        },
    }
}
