//! X01 (301, 501, ...): count down to exactly zero
//!
//! The stored score always reflects every dart thrown so far, including the
//! darts of the in-progress visit. A bust restores the score the player had
//! before the visit began.

use serde::{Deserialize, Serialize};

use crate::checkout::{suggest_checkout, Checkout, MAX_CHECKOUT};
use crate::config::{OutRule, X01Config};
use crate::dart::Dart;
use crate::game::{player_index, Game, GameKind, Player};
use crate::progress::MatchProgress;
use crate::visit::{Visit, VisitRecord, VisitTracker};

/// Visit history of a decided leg
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedLeg {
    pub leg: u32,
    /// Index of the player who checked out
    pub winner: Option<usize>,
    pub visits: Vec<VisitRecord>,
}

#[derive(Clone, Debug)]
pub struct X01Game {
    players: Vec<Player>,
    config: X01Config,
    scores: Vec<u32>,
    tracker: VisitTracker,
    progress: MatchProgress,
    completed_legs: Vec<CompletedLeg>,
}

impl X01Game {
    /// `players` must not be empty. `GameRegistry::create` checks player
    /// counts and the config before building.
    pub fn new(players: Vec<Player>, config: X01Config) -> Self {
        let count = players.len();
        Self {
            scores: vec![config.variant; count],
            tracker: VisitTracker::new(count),
            progress: MatchProgress::new(count, config.legs),
            completed_legs: Vec::new(),
            players,
            config,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &X01Config {
        &self.config
    }

    /// Finished visits of the current leg
    pub fn visit_history(&self) -> &[VisitRecord] {
        self.tracker.history()
    }

    /// Legs archived by `next_leg`
    pub fn completed_legs(&self) -> &[CompletedLeg] {
        &self.completed_legs
    }

    /// Archived legs plus the current leg once it has been decided.
    /// The deciding leg of a match is never archived by `next_leg`.
    pub fn match_legs(&self) -> Vec<CompletedLeg> {
        let mut legs = self.completed_legs.clone();
        if self.progress.is_leg_finished() {
            legs.push(self.current_leg_record());
        }
        legs
    }

    /// Darts thrown this leg, counting the in-progress visit
    pub fn darts_thrown(&self, player_id: &str) -> usize {
        let Some(player) = player_index(&self.players, player_id) else {
            return 0;
        };
        let finished: usize = self
            .tracker
            .history()
            .iter()
            .filter(|r| r.player == player)
            .map(|r| r.visit.len())
            .sum();
        let in_progress = if self.tracker.current_player() == player {
            self.tracker.current_visit().len()
        } else {
            0
        };
        finished + in_progress
    }

    /// Three-dart average for the current leg
    pub fn average(&self, player_id: &str) -> f64 {
        let darts = self.darts_thrown(player_id);
        if darts == 0 {
            return 0.0;
        }
        let scored = self.config.variant.saturating_sub(self.player_score(player_id));
        scored as f64 / darts as f64 * 3.0
    }

    /// Finishing route for the player at the oche
    pub fn checkout_suggestion(&self) -> Option<Checkout> {
        let score = self.scores[self.tracker.current_player()];
        let darts = self.tracker.darts_remaining();
        if score > MAX_CHECKOUT || darts == 0 {
            return None;
        }
        suggest_checkout(score, darts, self.config.out_rule)
    }

    // ========================================================================
    // RULES
    // ========================================================================

    fn is_bust(&self, new_score: i64, dart: Dart) -> bool {
        if new_score < 0 {
            return true;
        }
        match self.config.out_rule {
            OutRule::Single => false,
            OutRule::Double => new_score == 1 || (new_score == 0 && !dart.is_double()),
        }
    }

    fn current_leg_record(&self) -> CompletedLeg {
        CompletedLeg {
            leg: self.progress.current_leg(),
            winner: self.scores.iter().position(|&s| s == 0),
            visits: self.tracker.history().to_vec(),
        }
    }
}

impl Game for X01Game {
    fn kind(&self) -> GameKind {
        GameKind::X01
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
        let before = self.scores[player];
        let new_score = before as i64 - dart.value() as i64;
        self.tracker.add_dart(dart);

        if self.is_bust(new_score, dart) {
            // Earlier darts of this visit are given back along with this one
            let earlier = self.tracker.current_visit().total - dart.value();
            self.scores[player] = before + earlier;
            tracing::debug!(player, %dart, score = self.scores[player], "bust");
            self.tracker.end_visit(true, false);
            return;
        }

        self.scores[player] = new_score as u32;

        if new_score == 0 {
            tracing::debug!(player, %dart, "checkout");
            self.progress.award_leg(player);
            self.tracker.end_visit(false, true);
        } else if self.tracker.is_visit_complete() {
            self.tracker.end_visit(false, false);
        }
    }

    fn undo_last_throw(&mut self) -> bool {
        if let Some(dart) = self.tracker.undo_last_dart() {
            let player = self.tracker.current_player();
            self.scores[player] += dart.value();
            return true;
        }

        let Some(record) = self.tracker.undo_previous_visit() else {
            return false;
        };

        // Only the checkout dart can close a visit on a decided leg
        if self.progress.is_leg_finished() {
            self.progress.revoke_leg();
        }

        let player = record.player;
        let before_visit = if record.visit.busted {
            self.scores[player]
        } else {
            self.scores[player] + record.visit.total
        };
        self.scores[player] = before_visit - self.tracker.current_visit().total;
        tracing::debug!(player, score = self.scores[player], "undo across visit");
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
        if !self.progress.is_leg_finished() || self.progress.is_finished() {
            return;
        }
        let record = self.current_leg_record();
        self.completed_legs.push(record);

        if let Some(starter) = self.progress.advance_leg() {
            self.scores.fill(self.config.variant);
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
