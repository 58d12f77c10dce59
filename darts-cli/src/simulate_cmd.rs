//! Simulate command - play a match with random darts

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use darts_core::{Dart, Game, GameRegistry, Player};

#[derive(Args)]
pub struct SimulateArgs {
    /// Game id (see `darts games`)
    #[arg(long, default_value = "x01")]
    pub game: String,

    /// Number of players
    #[arg(long, default_value = "2")]
    pub players: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many darts even if the match is undecided
    #[arg(long, default_value = "10000")]
    pub max_darts: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, serde::Serialize)]
struct SimulationResult {
    game: String,
    darts: usize,
    legs: u32,
    finished: bool,
    winner: Option<String>,
    legs_won: Vec<(String, u32)>,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let registry = GameRegistry::new();
    let players: Vec<Player> = (1..=args.players)
        .map(|i| Player::new(format!("p{}", i), format!("Player {}", i)))
        .collect();
    let mut game = registry
        .create_default(&args.game, players)
        .with_context(|| format!("Cannot start {}", args.game))?;

    tracing::info!(
        "Simulating {} with {} players (seed={:?})",
        args.game,
        args.players,
        args.seed
    );

    let mut rng = create_rng(args.seed);
    let darts = play_out(game.as_mut(), &mut rng, args.max_darts);
    let result = summarize(game.as_ref(), darts);

    if !result.finished {
        tracing::warn!("Match undecided after {} darts", darts);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("\n=== {} ===", result.game);
        println!("Darts thrown: {}", result.darts);
        println!("Legs played:  {}", result.legs);
        for (name, legs) in &result.legs_won {
            println!("{:<16} legs {}", name, legs);
        }
        match &result.winner {
            Some(name) => println!("Winner: {}", name),
            None => println!("No winner"),
        }
    }
    Ok(())
}

/// Throw random darts until the match ends, returns darts thrown
fn play_out(game: &mut dyn Game, rng: &mut ChaCha8Rng, max_darts: usize) -> usize {
    let mut darts = 0;
    while !game.is_finished() && darts < max_darts {
        if game.is_leg_finished() {
            tracing::debug!(leg = game.current_leg(), "leg decided");
            game.next_leg();
            continue;
        }
        game.record_throw(random_dart(rng));
        darts += 1;
    }
    darts
}

/// Rough amateur spread: mostly singles, some misses and bulls
fn random_dart(rng: &mut ChaCha8Rng) -> Dart {
    let roll = rng.gen_range(0..100);
    let number = rng.gen_range(1..=20);
    match roll {
        0..=9 => Dart::MISS,
        10..=14 => Dart::outer_bull(),
        15..=17 => Dart::bull(),
        18..=29 => Dart::double(number),
        30..=41 => Dart::triple(number),
        _ => Dart::single(number),
    }
}

fn summarize(game: &dyn Game, darts: usize) -> SimulationResult {
    SimulationResult {
        game: game.kind().id().to_string(),
        darts,
        legs: game.current_leg(),
        finished: game.is_finished(),
        winner: game.winner().map(|p| p.name.clone()),
        legs_won: game
            .players()
            .iter()
            .map(|p| (p.name.clone(), game.legs_won(&p.id)))
            .collect(),
    }
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let registry = GameRegistry::new();
        let players = || vec![Player::new("a", "Alice"), Player::new("b", "Bob")];

        let mut first = registry.create_default("cricket", players()).unwrap();
        let mut second = registry.create_default("cricket", players()).unwrap();
        let a = play_out(first.as_mut(), &mut create_rng(Some(7)), 5000);
        let b = play_out(second.as_mut(), &mut create_rng(Some(7)), 5000);

        assert_eq!(a, b);
        assert_eq!(
            first.winner().map(|p| p.id.clone()),
            second.winner().map(|p| p.id.clone())
        );
    }

    #[test]
    fn test_every_game_finishes() {
        let registry = GameRegistry::new();
        for info in registry.iter() {
            let players = vec![Player::new("a", "Alice"), Player::new("b", "Bob")];
            let mut game = info.create(players, info.default_config()).unwrap();
            play_out(game.as_mut(), &mut create_rng(Some(42)), 100_000);
            assert!(game.is_finished(), "{} did not finish", info.id());
        }
    }
}
