//! Darts Core - Scoring engine for dart games
//!
//! This crate provides the rules and bookkeeping for:
//! - Dart notation and scoring values
//! - Visit tracking with turn rotation and dart-level undo
//! - X01, Cricket, Around the Clock, Around the World, Shanghai and Halve It
//! - Checkout suggestions for X01 finishes
//! - Match statistics from completed X01 legs
//! - A registry that builds any game by id

pub mod dart;
pub mod error;
pub mod visit;
pub mod progress;
pub mod game;
pub mod config;
pub mod checkout;
pub mod games;
pub mod stats;
pub mod registry;

// Re-exports for convenient access
pub use dart::{Dart, all_scoring_darts, describe, BULL, OUTER_BULL};
pub use error::{GameError, ParseDartError};
pub use visit::{Visit, VisitRecord, VisitTracker, DARTS_PER_VISIT};
pub use progress::MatchProgress;
pub use game::{Game, GameKind, Player};
pub use config::{
    ClockConfig, CricketConfig, GameConfig, HalveItConfig, HalveItTarget, MatchSetup, OutRule,
    ShanghaiConfig, WorldConfig, X01Config,
};
pub use checkout::{calculate_checkout, suggest_checkout, Checkout, BOGEY_NUMBERS, MAX_CHECKOUT};
pub use games::{
    ClockGame, CompletedLeg, CricketGame, HalveItGame, ShanghaiGame, WorldGame, X01Game,
};
pub use stats::{MatchRecord, MatchStatistics, PlayerStatistics};
pub use registry::{GameInfo, GameRegistry};
