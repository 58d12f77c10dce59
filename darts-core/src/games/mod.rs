//! Game variants
//!
//! Each variant composes a `VisitTracker` for turn bookkeeping and a
//! `MatchProgress` for legs, keeping only its own scoring and win rules.

pub mod clock;
pub mod cricket;
pub mod halve_it;
pub mod shanghai;
pub mod world;
pub mod x01;

pub use clock::ClockGame;
pub use cricket::{CricketGame, CRICKET_NUMBERS};
pub use halve_it::HalveItGame;
pub use shanghai::ShanghaiGame;
pub use world::{WorldGame, WORLD_SEQUENCE};
pub use x01::{CompletedLeg, X01Game};
