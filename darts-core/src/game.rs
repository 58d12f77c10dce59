//! The contract every game variant implements

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dart::Dart;
use crate::error::GameError;
use crate::visit::Visit;

/// Player identity, owned by whoever sets up the match
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Game variant identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    X01,
    Cricket,
    AroundTheClock,
    AroundTheWorld,
    Shanghai,
    HalveIt,
}

impl GameKind {
    pub const ALL: [GameKind; 6] = [
        GameKind::X01,
        GameKind::Cricket,
        GameKind::AroundTheClock,
        GameKind::AroundTheWorld,
        GameKind::Shanghai,
        GameKind::HalveIt,
    ];

    /// Stable string id used by the registry and setup files
    pub fn id(self) -> &'static str {
        match self {
            GameKind::X01 => "x01",
            GameKind::Cricket => "cricket",
            GameKind::AroundTheClock => "around-the-clock",
            GameKind::AroundTheWorld => "around-the-world",
            GameKind::Shanghai => "shanghai",
            GameKind::HalveIt => "halve-it",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GameKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| GameError::UnknownGame(s.to_string()))
    }
}

/// A running match of one game variant.
///
/// Mutators are total: throws outside a live leg are ignored, undo reports
/// whether anything was reversed, and `next_leg` only acts on a finished leg
/// of an unfinished match.
pub trait Game {
    fn kind(&self) -> GameKind;

    fn players(&self) -> &[Player];

    fn record_throw(&mut self, dart: Dart);

    /// Reverse the most recent throw of the current leg
    fn undo_last_throw(&mut self) -> bool;

    /// Match decided
    fn is_finished(&self) -> bool;

    /// Current leg decided, waiting for `next_leg`
    fn is_leg_finished(&self) -> bool;

    fn winner(&self) -> Option<&Player>;

    fn current_player(&self) -> &Player;

    /// Remaining score (X01), target or progress (Clock, World) or points.
    /// Unknown ids score 0.
    fn player_score(&self, player_id: &str) -> u32;

    fn next_leg(&mut self);

    /// 1-based leg number
    fn current_leg(&self) -> u32;

    fn legs_won(&self, player_id: &str) -> u32;

    fn current_visit(&self) -> &Visit;

    fn darts_remaining(&self) -> usize;
}

/// Position of `player_id` in throwing order
pub(crate) fn player_index(players: &[Player], player_id: &str) -> Option<usize> {
    players.iter().position(|p| p.id == player_id)
}
