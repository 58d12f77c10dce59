//! Error types for the fallible edges of the engine
//!
//! Throwing, undoing and advancing legs never fail. Errors only come from
//! parsing dart notation and from building a game.

use crate::game::GameKind;

/// Dart notation could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDartError {
    #[error("empty dart notation")]
    Empty,

    #[error("invalid dart notation: {0}")]
    Invalid(String),

    #[error("segment {0} is not on the board")]
    SegmentOutOfRange(u8),
}

/// A game could not be created
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("unknown game type: {0}")]
    UnknownGame(String),

    #[error("{kind} needs {min}-{max} players, got {got}")]
    PlayerCount {
        kind: GameKind,
        min: usize,
        max: usize,
        got: usize,
    },

    #[error("duplicate player id: {0}")]
    DuplicatePlayer(String),

    #[error("config for {found} cannot start a {expected} game")]
    ConfigMismatch { expected: GameKind, found: GameKind },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
