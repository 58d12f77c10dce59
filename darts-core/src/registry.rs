//! Game registry - the entry point for building a game by id

use rustc_hash::FxHashMap;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Game, GameKind, Player};
use crate::games::{ClockGame, CricketGame, HalveItGame, ShanghaiGame, WorldGame, X01Game};

/// Builds a game from players and a config of the matching variant
pub type GameFactory = fn(Vec<Player>, GameConfig) -> Result<Box<dyn Game>, GameError>;

/// Registry entry: metadata plus factory
#[derive(Clone, Debug)]
pub struct GameInfo {
    pub kind: GameKind,
    pub name: &'static str,
    pub description: &'static str,
    pub min_players: usize,
    pub max_players: usize,
    factory: GameFactory,
}

impl GameInfo {
    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    pub fn default_config(&self) -> GameConfig {
        GameConfig::default_for(self.kind)
    }

    /// Validate players and config, then build the game
    pub fn create(&self, players: Vec<Player>, config: GameConfig) -> Result<Box<dyn Game>, GameError> {
        self.check(&players, &config)?;
        tracing::debug!(game = self.id(), players = players.len(), "creating game");
        (self.factory)(players, config)
    }

    /// Reject a player list or config this game cannot start with
    pub fn check(&self, players: &[Player], config: &GameConfig) -> Result<(), GameError> {
        let got = players.len();
        if got < self.min_players || got > self.max_players {
            return Err(GameError::PlayerCount {
                kind: self.kind,
                min: self.min_players,
                max: self.max_players,
                got,
            });
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].iter().any(|p| p.id == player.id) {
                return Err(GameError::DuplicatePlayer(player.id.clone()));
            }
        }
        if config.kind() != self.kind {
            return Err(GameError::ConfigMismatch {
                expected: self.kind,
                found: config.kind(),
            });
        }
        config.validate()
    }
}

/// Lookup table of every game variant by id
#[derive(Clone, Debug)]
pub struct GameRegistry {
    games: FxHashMap<&'static str, GameInfo>,
}

impl GameRegistry {
    pub fn new() -> Self {
        let mut games = FxHashMap::default();
        for info in builtin_games() {
            games.insert(info.id(), info);
        }
        Self { games }
    }

    pub fn get(&self, id: &str) -> Option<&GameInfo> {
        self.games.get(id)
    }

    /// Entries in `GameKind::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = &GameInfo> + '_ {
        GameKind::ALL.into_iter().filter_map(|kind| self.games.get(kind.id()))
    }

    pub fn create(&self, id: &str, players: Vec<Player>, config: GameConfig) -> Result<Box<dyn Game>, GameError> {
        self.get(id)
            .ok_or_else(|| GameError::UnknownGame(id.to_string()))?
            .create(players, config)
    }

    /// Build with the variant's default config
    pub fn create_default(&self, id: &str, players: Vec<Player>) -> Result<Box<dyn Game>, GameError> {
        let info = self.get(id).ok_or_else(|| GameError::UnknownGame(id.to_string()))?;
        info.create(players, info.default_config())
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// BUILT-IN GAMES
// ============================================================================

fn builtin_games() -> [GameInfo; 6] {
    [
        GameInfo {
            kind: GameKind::X01,
            name: "X01",
            description: "Count down from 301 or 501 to exactly zero",
            min_players: 1,
            max_players: 8,
            factory: create_x01,
        },
        GameInfo {
            kind: GameKind::Cricket,
            name: "Cricket",
            description: "Close 15-20 and the bull while outscoring your opponents",
            min_players: 1,
            max_players: 4,
            factory: create_cricket,
        },
        GameInfo {
            kind: GameKind::AroundTheClock,
            name: "Around the Clock",
            description: "Hit every number from 1 to 20 in order",
            min_players: 1,
            max_players: 8,
            factory: create_clock,
        },
        GameInfo {
            kind: GameKind::AroundTheWorld,
            name: "Around the World",
            description: "Go round 1 to 20 and the bull, doubles and trebles skip ahead",
            min_players: 1,
            max_players: 8,
            factory: create_world,
        },
        GameInfo {
            kind: GameKind::Shanghai,
            name: "Shanghai",
            description: "Score on the round's number; single, double and treble wins outright",
            min_players: 1,
            max_players: 8,
            factory: create_shanghai,
        },
        GameInfo {
            kind: GameKind::HalveIt,
            name: "Halve It",
            description: "Hit each round's target or have your score halved",
            min_players: 1,
            max_players: 8,
            factory: create_halve_it,
        },
    ]
}

fn mismatch(expected: GameKind, config: &GameConfig) -> GameError {
    GameError::ConfigMismatch {
        expected,
        found: config.kind(),
    }
}

fn create_x01(players: Vec<Player>, config: GameConfig) -> Result<Box<dyn Game>, GameError> {
    match config {
        GameConfig::X01(c) => Ok(Box::new(X01Game::new(players, c))),
        other => Err(mismatch(GameKind::X01, &other)),
    }
}

fn create_cricket(players: Vec<Player>, config: GameConfig) -> Result<Box<dyn Game>, GameError> {
    match config {
        GameConfig::Cricket(c) => Ok(Box::new(CricketGame::new(players, c))),
        other => Err(mismatch(GameKind::Cricket, &other)),
    }
}

fn create_clock(players: Vec<Player>, config: GameConfig) -> Result<Box<dyn Game>, GameError> {
    match config {
        GameConfig::AroundTheClock(c) => Ok(Box::new(ClockGame::new(players, c))),
        other => Err(mismatch(GameKind::AroundTheClock, &other)),
    }
}

fn create_world(players: Vec<Player>, config: GameConfig) -> Result<Box<dyn Game>, GameError> {
    match config {
        GameConfig::AroundTheWorld(c) => Ok(Box::new(WorldGame::new(players, c))),
        other => Err(mismatch(GameKind::AroundTheWorld, &other)),
    }
}

fn create_shanghai(players: Vec<Player>, config: GameConfig) -> Result<Box<dyn Game>, GameError> {
    match config {
        GameConfig::Shanghai(c) => Ok(Box::new(ShanghaiGame::new(players, c))),
        other => Err(mismatch(GameKind::Shanghai, &other)),
    }
}

fn create_halve_it(players: Vec<Player>, config: GameConfig) -> Result<Box<dyn Game>, GameError> {
    match config {
        GameConfig::HalveIt(c) => Ok(Box::new(HalveItGame::new(players, c))),
        other => Err(mismatch(GameKind::HalveIt, &other)),
    }
}
