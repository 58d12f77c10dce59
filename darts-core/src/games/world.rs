//! Around the World: 1 through 20 then the bull, doubles and trebles skip ahead

use crate::config::WorldConfig;
use crate::dart::{Dart, OUTER_BULL};
use crate::game::{player_index, Game, GameKind, Player};
use crate::progress::MatchProgress;
use crate::visit::{Visit, VisitTracker};

/// Targets in order
pub const WORLD_SEQUENCE: [u8; 21] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, OUTER_BULL,
];

#[derive(Clone, Copy, Debug)]
struct ThrowSnapshot {
    player: usize,
    previous_index: usize,
}

fn hits(dart: Dart, target: u8) -> bool {
    if target == OUTER_BULL {
        dart.is_bull()
    } else {
        !dart.is_miss() && dart.segment == target
    }
}

#[derive(Clone, Debug)]
pub struct WorldGame {
    players: Vec<Player>,
    config: WorldConfig,
    indices: Vec<usize>,
    tracker: VisitTracker,
    progress: MatchProgress,
    snapshots: Vec<ThrowSnapshot>,
}

impl WorldGame {
    /// `players` must not be empty. `GameRegistry::create` checks player
    /// counts and the config before building.
    pub fn new(players: Vec<Player>, config: WorldConfig) -> Self {
        let count = players.len();
        Self {
            indices: vec![0; count],
            tracker: VisitTracker::new(count),
            progress: MatchProgress::new(count, config.legs),
            snapshots: Vec::new(),
            players,
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Next target, None once the sequence is done
    pub fn target(&self, player_id: &str) -> Option<u8> {
        let index = self.indices[player_index(&self.players, player_id)?];
        WORLD_SEQUENCE.get(index).copied()
    }
}

impl Game for WorldGame {
    fn kind(&self) -> GameKind {
        GameKind::AroundTheWorld
    }

    fn players(&self) -> &[Player] {
        &self.players
    }

    fn record_throw(&mut self, dart: Dart) {
        if !self.progress.accepts_throws() || self.tracker.is_visit_complete() {
            tracing::debug!(%dart, "throw ignored");
            return;
        }

        let player = self.tracker.current_player();
        let previous_index = self.indices[player];
        self.snapshots.push(ThrowSnapshot { player, previous_index });
        self.tracker.add_dart(dart);

        if let Some(&target) = WORLD_SEQUENCE.get(previous_index) {
            if hits(dart, target) {
                let advance = dart.multiplier.max(1) as usize;
                self.indices[player] = (previous_index + advance).min(WORLD_SEQUENCE.len());
            }
        }

        if self.indices[player] >= WORLD_SEQUENCE.len() {
            self.progress.award_leg(player);
            self.tracker.end_visit(false, true);
        } else if self.tracker.is_visit_complete() {
            self.tracker.end_visit(false, false);
        }
    }

    fn undo_last_throw(&mut self) -> bool {
        let Some(snapshot) = self.snapshots.pop() else {
            return false;
        };
        self.indices[snapshot.player] = snapshot.previous_index;
        if self.progress.is_leg_finished() {
            self.progress.revoke_leg();
        }
        self.tracker.undo_dart();
        true
    }

    fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }

    fn is_leg_finished(&self) -> bool {
        self.progress.is_leg_finished()
    }

    fn winner(&self) -> Option<&Player> {
        self.progress.winner().map(|i| &self.players[i])
    }

    fn current_player(&self) -> &Player {
        &self.players[self.tracker.current_player()]
    }

    /// Targets completed so far
    fn player_score(&self, player_id: &str) -> u32 {
        player_index(&self.players, player_id)
            .map(|i| self.indices[i] as u32)
            .unwrap_or(0)
    }

    fn next_leg(&mut self) {
        if let Some(starter) = self.progress.advance_leg() {
            self.indices.fill(0);
            self.snapshots.clear();
            self.tracker.reset_all(starter);
        }
    }

    fn current_leg(&self) -> u32 {
        self.progress.current_leg()
    }

    fn legs_won(&self, player_id: &str) -> u32 {
        player_index(&self.players, player_id)
            .map(|i| self.progress.legs_won(i))
            .unwrap_or(0)
    }

    fn current_visit(&self) -> &Visit {
        self.tracker.current_visit()
    }

    fn darts_remaining(&self) -> usize {
        self.tracker.darts_remaining()
    }
}
