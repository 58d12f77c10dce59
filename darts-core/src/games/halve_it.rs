//! Halve It: hit each round's target or lose half your score
//!
//! Undo does not keep per-dart snapshots. The visit's hit flag and points are
//! recomputed from whatever darts remain, and the score is rebuilt on top of
//! the score the visit started from.

use crate::config::{HalveItConfig, HalveItTarget};
use crate::dart::Dart;
use crate::game::{player_index, Game, GameKind, Player};
use crate::games::shanghai::leader;
use crate::progress::MatchProgress;
use crate::visit::{Visit, VisitTracker};

/// Does `dart` count for a round aimed at `target`
pub fn hits_target(dart: Dart, target: HalveItTarget) -> bool {
    match target {
        HalveItTarget::Number(n) => !dart.is_miss() && dart.segment == n,
        HalveItTarget::Double => dart.is_number() && dart.multiplier == 2,
        HalveItTarget::Triple => dart.is_triple(),
        HalveItTarget::Bull => dart.is_bull(),
    }
}

#[derive(Clone, Debug)]
pub struct HalveItGame {
    players: Vec<Player>,
    config: HalveItConfig,
    scores: Vec<u32>,
    /// Index into `config.targets`
    round: usize,
    round_player_count: usize,
    /// Score of the thrower when the in-progress visit began
    visit_start: u32,
    /// Starting score of every finished visit, parallel to the visit history
    visit_starts: Vec<u32>,
    visit_hit_target: bool,
    visit_points: u32,
    tracker: VisitTracker,
    progress: MatchProgress,
}

impl HalveItGame {
    /// `players` must not be empty. `GameRegistry::create` checks player
    /// counts and the config before building.
    pub fn new(players: Vec<Player>, config: HalveItConfig) -> Self {
        let count = players.len();
        Self {
            scores: vec![config.starting_score; count],
            round: 0,
            round_player_count: 0,
            visit_start: config.starting_score,
            visit_starts: Vec::new(),
            visit_hit_target: false,
            visit_points: 0,
            tracker: VisitTracker::new(count),
            progress: MatchProgress::new(count, config.legs),
            players,
            config,
        }
    }

    pub fn config(&self) -> &HalveItConfig {
        &self.config
    }

    /// 1-based round number
    pub fn round(&self) -> usize {
        self.round + 1
    }

    /// This round's target, None once every round is played
    pub fn target(&self) -> Option<HalveItTarget> {
        self.config.targets.get(self.round).copied()
    }

    /// Rebuild the visit's hit flag and points from its remaining darts
    fn recompute_visit(&mut self) {
        self.visit_hit_target = false;
        self.visit_points = 0;
        let Some(target) = self.target() else {
            return;
        };
        for dart in &self.tracker.current_visit().darts {
            if hits_target(*dart, target) {
                self.visit_hit_target = true;
                self.visit_points += dart.value();
            }
        }
    }

    fn finish_turn(&mut self) {
        self.round_player_count += 1;
        if self.round_player_count < self.players.len() {
            return;
        }
        self.round_player_count = 0;
        self.round += 1;
        if self.round >= self.config.targets.len() {
            let winner = leader(&self.scores);
            tracing::debug!(winner, score = self.scores[winner], "final round complete");
            self.progress.award_leg(winner);
        }
    }

    fn unfinish_turn(&mut self) {
        if self.round_player_count == 0 {
            self.round = self.round.saturating_sub(1);
            self.round_player_count = self.players.len() - 1;
        } else {
            self.round_player_count -= 1;
        }
    }
}

impl Game for HalveItGame {
    fn kind(&self) -> GameKind {
        GameKind::HalveIt
    }

    fn players(&self) -> &[Player] {
        &self.players
    }

    fn record_throw(&mut self, dart: Dart) {
        if !self.progress.accepts_throws() || self.tracker.is_visit_complete() {
            tracing::debug!(%dart, "throw ignored");
            return;
        }
        let Some(target) = self.target() else {
            return;
        };

        let player = self.tracker.current_player();
        if self.tracker.current_visit().is_empty() {
            self.visit_start = self.scores[player];
        }
        self.tracker.add_dart(dart);

        if hits_target(dart, target) {
            self.visit_hit_target = true;
            self.visit_points += dart.value();
            self.scores[player] += dart.value();
        }

        if !self.tracker.is_visit_complete() {
            return;
        }

        if !self.visit_hit_target {
            self.scores[player] /= 2;
            tracing::debug!(player, score = self.scores[player], "halved");
        }
        self.visit_starts.push(self.visit_start);
        self.tracker.end_visit(false, false);
        self.visit_hit_target = false;
        self.visit_points = 0;
        self.finish_turn();
    }

    fn undo_last_throw(&mut self) -> bool {
        if self.tracker.undo_last_dart().is_some() {
            let player = self.tracker.current_player();
            self.recompute_visit();
            self.scores[player] = self.visit_start + self.visit_points;
            return true;
        }

        let Some(record) = self.tracker.undo_previous_visit() else {
            return false;
        };
        if self.progress.is_leg_finished() {
            self.progress.revoke_leg();
        }
        self.unfinish_turn();
        self.visit_start = self.visit_starts.pop().unwrap_or(self.config.starting_score);
        self.recompute_visit();
        self.scores[record.player] = self.visit_start + self.visit_points;
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
            self.scores.fill(self.config.starting_score);
            self.round = 0;
            self.round_player_count = 0;
            self.visit_start = self.config.starting_score;
            self.visit_starts.clear();
            self.visit_hit_target = false;
            self.visit_points = 0;
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
