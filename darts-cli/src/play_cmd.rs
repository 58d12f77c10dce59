//! Play command - replay a scripted match
//!
//! ## Architecture
//!
//! - run() loads the setup and script, builds the game, replays, reports
//! - X01 matches are built as `X01Game` so match statistics can be reported

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use darts_core::{
    Dart, Game, GameConfig, GameRegistry, MatchRecord, MatchSetup, MatchStatistics, X01Game,
};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Match setup JSON file (players and game config)
    #[arg(long, value_name = "FILE")]
    pub setup: PathBuf,

    /// Throw script JSON file: an array of darts, "undo" and "next-leg"
    #[arg(long, value_name = "FILE")]
    pub throws: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One step of a throw script
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScriptEvent {
    Throw(Dart),
    Undo,
    NextLeg,
}

/// Counts from replaying a script
#[derive(Clone, Debug, Default, serde::Serialize)]
struct ReplaySummary {
    throws: usize,
    undos: usize,
    legs_started: usize,
}

#[derive(Clone, Debug, serde::Serialize)]
struct PlayerLine {
    id: String,
    name: String,
    score: u32,
    legs_won: u32,
}

#[derive(Clone, Debug, serde::Serialize)]
struct PlayReport {
    game: String,
    leg: u32,
    leg_finished: bool,
    finished: bool,
    winner: Option<String>,
    current_player: String,
    players: Vec<PlayerLine>,
    replay: ReplaySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<MatchStatistics>,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: PlayArgs) -> Result<()> {
    let setup = MatchSetup::load(&args.setup)
        .with_context(|| format!("Failed to load setup: {}", args.setup.display()))?;
    let events = load_script(&args.throws)
        .with_context(|| format!("Failed to load throw script: {}", args.throws.display()))?;

    let registry = GameRegistry::new();
    let kind = setup.config.kind();
    let info = registry
        .get(kind.id())
        .with_context(|| format!("Game {} is not registered", kind))?;
    info.check(&setup.players, &setup.config)?;

    tracing::info!(
        "Replaying {} events of {} for {} players",
        events.len(),
        info.name,
        setup.players.len()
    );

    let report = match setup.config {
        GameConfig::X01(config) => {
            let mut game = X01Game::new(setup.players, config);
            let summary = replay(&mut game, &events);
            let statistics = MatchRecord::from_x01(&game).statistics();
            build_report(&game, summary, Some(statistics))
        }
        config => {
            let mut game = info.create(setup.players, config)?;
            let summary = replay(game.as_mut(), &events);
            build_report(game.as_ref(), summary, None)
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text_report(&report);
    }
    Ok(())
}

// ============================================================================
// STEPS
// ============================================================================

fn load_script(path: &Path) -> Result<Vec<ScriptEvent>> {
    let content = std::fs::read_to_string(path)?;
    let tokens: Vec<String> = serde_json::from_str(&content)?;
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| parse_event(token).with_context(|| format!("Event {}: {:?}", i + 1, token)))
        .collect()
}

fn parse_event(token: &str) -> Result<ScriptEvent> {
    match token.trim().to_ascii_lowercase().as_str() {
        "undo" => Ok(ScriptEvent::Undo),
        "next-leg" => Ok(ScriptEvent::NextLeg),
        _ => Ok(ScriptEvent::Throw(token.parse()?)),
    }
}

fn replay<G: Game + ?Sized>(game: &mut G, events: &[ScriptEvent]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for event in events {
        match *event {
            ScriptEvent::Throw(dart) => {
                game.record_throw(dart);
                summary.throws += 1;
            }
            ScriptEvent::Undo => {
                if game.undo_last_throw() {
                    summary.undos += 1;
                }
            }
            ScriptEvent::NextLeg => {
                let leg = game.current_leg();
                game.next_leg();
                if game.current_leg() != leg {
                    summary.legs_started += 1;
                }
            }
        }
    }
    summary
}

fn build_report<G: Game + ?Sized>(
    game: &G,
    replay: ReplaySummary,
    statistics: Option<MatchStatistics>,
) -> PlayReport {
    PlayReport {
        game: game.kind().id().to_string(),
        leg: game.current_leg(),
        leg_finished: game.is_leg_finished(),
        finished: game.is_finished(),
        winner: game.winner().map(|p| p.name.clone()),
        current_player: game.current_player().name.clone(),
        players: game
            .players()
            .iter()
            .map(|p| PlayerLine {
                id: p.id.clone(),
                name: p.name.clone(),
                score: game.player_score(&p.id),
                legs_won: game.legs_won(&p.id),
            })
            .collect(),
        replay,
        statistics,
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn print_text_report(report: &PlayReport) {
    println!("\n=== {} - leg {} ===", report.game, report.leg);
    for player in &report.players {
        println!(
            "{:<16} score {:>4}  legs {}",
            player.name, player.score, player.legs_won
        );
    }
    match &report.winner {
        Some(name) => println!("Winner: {}", name),
        None if report.leg_finished => println!("Leg decided, waiting for next leg"),
        None => println!("To throw: {}", report.current_player),
    }
    println!(
        "Replayed {} throws, {} undos, {} new legs",
        report.replay.throws, report.replay.undos, report.replay.legs_started
    );

    if let Some(stats) = &report.statistics {
        println!("\n=== Statistics ({} legs) ===", stats.legs_played);
        for p in &stats.players {
            println!(
                "{:<16} avg {:>6.2}  darts {:>3}  high {:>3}  100+ {}  140+ {}  180 {}",
                p.name,
                p.three_dart_average,
                p.darts_thrown,
                p.highest_visit,
                p.visits_100_plus,
                p.visits_140_plus,
                p.visits_180
            );
        }
    }
}
