//! Wanderlist CLI
//!
//! Terminal front end for the places catalog:
//! - List ranked places
//! - Show a single place
//! - Browse interactively, building up a click history
//! - Generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use wanderlist::client::{ClientError, PlacesApi, PlacesClient};
use wanderlist::config::{Config, LoggingConfig};
use wanderlist::routing::Route;
use wanderlist::views::{Navigator, ViewError};

#[derive(Parser)]
#[command(name = "wanderlist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse travel places ranked by your click history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Ranking service URL (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at the configured level instead of warnings only
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List places ranked against the click history
    List {
        /// Record a click on this place id before listing (repeatable)
        #[arg(long = "visit")]
        visits: Vec<i64>,
    },

    /// Show one place
    Show {
        /// Place id, passed to the service as given
        id: String,
    },

    /// Browse interactively: pick places by number, `back`, `history`, `quit`
    Browse,

    /// List places in the service's default order
    Top,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.base_url {
        config.client.base_url = url.clone();
    }

    let logging = if cli.verbose {
        config.logging.clone()
    } else {
        LoggingConfig {
            level: "warn".to_string(),
            ..config.logging.clone()
        }
    };
    wanderlist::logging::init(&logging, "");

    let client = PlacesClient::new(config.client.to_client_config())?;

    match cli.command {
        Commands::List { visits } => {
            for id in visits {
                client.record_click(id).await;
            }

            let mut navigator = Navigator::new(Arc::new(client.clone()));
            let result = navigator.navigate(Route::Places).await;
            report(&client, result)?;
            print!("{}", navigator.render());
        }

        Commands::Show { id } => {
            let mut navigator = Navigator::new(Arc::new(client.clone()));
            let result = navigator.navigate(Route::place(id)).await;
            report(&client, result)?;
            print!("{}", navigator.render());
        }

        Commands::Browse => {
            browse(client).await?;
        }

        Commands::Top => {
            let places = match client.default_ranking().await {
                Ok(places) => places,
                Err(e) => {
                    report(&client, Err(ViewError::Client(e)))?;
                    Vec::new()
                }
            };

            if places.is_empty() {
                println!("No places.");
            }
            for (i, place) in places.iter().enumerate() {
                println!("[{}] {}", i + 1, place);
            }
        }

        Commands::Config { output } => {
            let config = wanderlist::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Interactive loop over the navigator
async fn browse(client: PlacesClient) -> anyhow::Result<()> {
    let mut navigator = Navigator::new(Arc::new(client.clone()));
    let result = navigator.navigate(Route::Places).await;
    show(&client, &navigator, result);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "" => continue,
            "quit" | "q" | "exit" => break,
            "help" | "?" => print_browse_help(),
            "history" => {
                let history = client.history().await;
                if history.is_empty() {
                    println!("No clicks yet.");
                } else {
                    let ids: Vec<String> = history.iter().map(|id| id.to_string()).collect();
                    println!("Clicks: {}", ids.join(", "));
                }
            }
            "back" | "places" => {
                let result = navigator.navigate(Route::Places).await;
                show(&client, &navigator, result);
            }
            input => match input.parse::<usize>() {
                Ok(position) => {
                    let result = navigator.select(position).await;
                    show(&client, &navigator, result);
                }
                Err(_) => {
                    let result = navigator.navigate_to(input).await;
                    show(&client, &navigator, result);
                }
            },
        }
    }

    Ok(())
}

/// Print the current view, then any navigation error
fn show(client: &PlacesClient, navigator: &Navigator, result: Result<(), ViewError>) {
    print!("{}", navigator.render());
    if let Err(e) = result {
        describe_error(client, &e);
    }
}

/// Print `result`'s error. Only an unreachable service is handed back, failing
/// the one-shot command; anything else still shows the view.
fn report(client: &PlacesClient, result: Result<(), ViewError>) -> Result<(), ViewError> {
    match result {
        Err(e @ ViewError::Client(ClientError::Unavailable)) => {
            describe_error(client, &e);
            Err(e)
        }
        Err(e) => {
            describe_error(client, &e);
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}

fn describe_error(client: &PlacesClient, error: &ViewError) {
    match error {
        ViewError::Client(ClientError::Unavailable) => {
            eprintln!("Cannot connect to the ranking service at {}", client.base_url());
            eprintln!();
            eprintln!("Make sure the ranking server is running:");
            eprintln!("  cargo run --bin wanderlist-api");
        }
        other => eprintln!("Error: {}", other),
    }
}

fn print_browse_help() {
    println!("Commands:");
    println!("  <number>       open the place at that position");
    println!("  back, places   return to the catalog");
    println!("  place/<id>     open a place by id");
    println!("  history        show recorded clicks");
    println!("  quit           exit");
}
