//! Shanghai: one target number per round, single + double + treble wins outright

use crate::config::ShanghaiConfig;
use crate::dart::Dart;
use crate::game::{player_index, Game, GameKind, Player};
use crate::progress::MatchProgress;
use crate::visit::{Visit, VisitTracker};

/// Round bookkeeping and the thrower's score before a dart
#[derive(Clone, Copy, Debug)]
struct ThrowSnapshot {
    player: usize,
    score: u32,
    round: u32,
    round_player_count: usize,
}

/// Single, double and treble of `target` all present in the visit
pub fn is_shanghai(darts: &[Dart], target: u32) -> bool {
    let on_target = |multiplier: u8| {
        darts
            .iter()
            .any(|d| d.is_number() && d.segment as u32 == target && d.multiplier == multiplier)
    };
    on_target(1) && on_target(2) && on_target(3)
}

/// First player holding the highest score
pub(crate) fn leader(scores: &[u32]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

#[derive(Clone, Debug)]
pub struct ShanghaiGame {
    players: Vec<Player>,
    config: ShanghaiConfig,
    scores: Vec<u32>,
    round: u32,
    round_player_count: usize,
    tracker: VisitTracker,
    progress: MatchProgress,
    snapshots: Vec<ThrowSnapshot>,
}

impl ShanghaiGame {
    /// `players` must not be empty. `GameRegistry::create` checks player
    /// counts and the config before building.
    pub fn new(players: Vec<Player>, config: ShanghaiConfig) -> Self {
        let count = players.len();
        Self {
            scores: vec![0; count],
            round: 1,
            round_player_count: 0,
            tracker: VisitTracker::new(count),
            progress: MatchProgress::new(count, config.legs),
            snapshots: Vec::new(),
            players,
            config,
        }
    }

    pub fn config(&self) -> &ShanghaiConfig {
        &self.config
    }

    /// 1-based round number
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Number to aim at this round
    pub fn target(&self) -> u32 {
        self.config.start_number + self.round - 1
    }

    /// Called after a full visit that did not end the leg
    fn finish_turn(&mut self) {
        self.round_player_count += 1;
        if self.round_player_count < self.players.len() {
            return;
        }
        self.round_player_count = 0;
        self.round += 1;
        if self.round > self.config.rounds {
            let winner = leader(&self.scores);
            tracing::debug!(winner, score = self.scores[winner], "final round complete");
            self.progress.award_leg(winner);
        }
    }
}

impl Game for ShanghaiGame {
    fn kind(&self) -> GameKind {
        GameKind::Shanghai
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
        self.snapshots.push(ThrowSnapshot {
            player,
            score: self.scores[player],
            round: self.round,
            round_player_count: self.round_player_count,
        });
        self.tracker.add_dart(dart);

        let target = self.target();
        if dart.is_number() && dart.segment as u32 == target {
            self.scores[player] += dart.value();
        }

        if is_shanghai(&self.tracker.current_visit().darts, target) {
            tracing::debug!(player, target, "shanghai");
            self.progress.award_leg(player);
            self.tracker.end_visit(false, true);
        } else if self.tracker.is_visit_complete() {
            self.tracker.end_visit(false, false);
            self.finish_turn();
        }
    }

    fn undo_last_throw(&mut self) -> bool {
        let Some(snapshot) = self.snapshots.pop() else {
            return false;
        };
        self.scores[snapshot.player] = snapshot.score;
        self.round = snapshot.round;
        self.round_player_count = snapshot.round_player_count;
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

    fn player_score(&self, player_id: &str) -> u32 {
        player_index(&self.players, player_id)
            .map(|i| self.scores[i])
            .unwrap_or(0)
    }

    fn next_leg(&mut self) {
        if let Some(starter) = self.progress.advance_leg() {
            self.scores.fill(0);
            self.round = 1;
            self.round_player_count = 0;
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
