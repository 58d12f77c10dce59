//! Darts CLI - Command-line interface
//!
//! Commands:
//! - games: List the registered game types
//! - checkout: Suggest a finishing route for an X01 score
//! - play: Replay a scripted match from a setup file
//! - simulate: Play a match with random darts

mod checkout_cmd;
mod play_cmd;
mod simulate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use darts_core::GameRegistry;

#[derive(Parser)]
#[command(name = "darts")]
#[command(about = "Dart game scoring engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available games
    Games {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest a checkout for an X01 score
    Checkout(checkout_cmd::CheckoutArgs),
    /// Replay a scripted match
    Play(play_cmd::PlayArgs),
    /// Play a match with random darts
    Simulate(simulate_cmd::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Games { json } => list_games(json),
        Commands::Checkout(args) => checkout_cmd::run(args),
        Commands::Play(args) => play_cmd::run(args),
        Commands::Simulate(args) => simulate_cmd::run(args),
    }
}

fn list_games(json: bool) -> anyhow::Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        id: &'static str,
        name: &'static str,
        description: &'static str,
        min_players: usize,
        max_players: usize,
    }

    let registry = GameRegistry::new();

    if json {
        let games: Vec<JsonGame> = registry
            .iter()
            .map(|info| JsonGame {
                id: info.id(),
                name: info.name,
                description: info.description,
                min_players: info.min_players,
                max_players: info.max_players,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&games)?);
        return Ok(());
    }

    for info in registry.iter() {
        println!(
            "{:<18} {:<18} {}-{} players  {}",
            info.id(),
            info.name,
            info.min_players,
            info.max_players,
            info.description
        );
    }
    Ok(())
}
