//! Around the Clock: hit 1 through 20 in order, optionally finishing on the bull

use crate::config::ClockConfig;
use crate::dart::{Dart, MAX_NUMBER, OUTER_BULL};
use crate::game::{player_index, Game, GameKind, Player};
use crate::progress::MatchProgress;
use crate::visit::{Visit, VisitTracker};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ClockPlayer {
    target: u8,
    complete: bool,
}

impl Default for ClockPlayer {
    fn default() -> Self {
        Self {
            target: 1,
            complete: false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ThrowSnapshot {
    player: usize,
    before: ClockPlayer,
}

/// Target after `current`, or None once the circuit is done
pub fn next_target(current: u8, advance: u8, includes_bull: bool) -> Option<u8> {
    if current == OUTER_BULL {
        return None;
    }
    let next = current.saturating_add(advance);
    if next <= MAX_NUMBER {
        Some(next)
    } else if includes_bull {
        Some(OUTER_BULL)
    } else {
        None
    }
}

fn hits_target(dart: Dart, target: u8) -> bool {
    if target == OUTER_BULL {
        dart.is_bull()
    } else {
        !dart.is_miss() && dart.segment == target
    }
}

#[derive(Clone, Debug)]
pub struct ClockGame {
    players: Vec<Player>,
    config: ClockConfig,
    state: Vec<ClockPlayer>,
    tracker: VisitTracker,
    progress: MatchProgress,
    snapshots: Vec<ThrowSnapshot>,
}

impl ClockGame {
    /// `players` must not be empty. `GameRegistry::create` checks player
    /// counts and the config before building.
    pub fn new(players: Vec<Player>, config: ClockConfig) -> Self {
        let count = players.len();
        Self {
            state: vec![ClockPlayer::default(); count],
            tracker: VisitTracker::new(count),
            progress: MatchProgress::new(count, config.legs),
            snapshots: Vec::new(),
            players,
            config,
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Number the player is aiming at, None once they have gone round
    pub fn target(&self, player_id: &str) -> Option<u8> {
        let state = self.state[player_index(&self.players, player_id)?];
        (!state.complete).then_some(state.target)
    }
}

impl Game for ClockGame {
    fn kind(&self) -> GameKind {
        GameKind::AroundTheClock
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
        let before = self.state[player];
        self.snapshots.push(ThrowSnapshot { player, before });
        self.tracker.add_dart(dart);

        if hits_target(dart, before.target) {
            let advance = if self.config.doubles_advance_extra {
                dart.multiplier.max(1)
            } else {
                1
            };
            match next_target(before.target, advance, self.config.includes_bull) {
                Some(target) => self.state[player].target = target,
                None => self.state[player].complete = true,
            }
        }

        if self.state[player].complete {
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
        self.state[snapshot.player] = snapshot.before;
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

    /// Current target; the last target stays once the circuit is complete
    fn player_score(&self, player_id: &str) -> u32 {
        player_index(&self.players, player_id)
            .map(|i| self.state[i].target as u32)
            .unwrap_or(0)
    }

    fn next_leg(&mut self) {
        if let Some(starter) = self.progress.advance_leg() {
            self.state.fill(ClockPlayer::default());
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

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(doubles_advance_extra: bool, includes_bull: bool) -> ClockGame {
        let players = vec![Player::new("a", "Alice"), Player::new("b", "Bob")];
        ClockGame::new(
            players,
            ClockConfig {
                doubles_advance_extra,
                includes_bull,
                legs: 1,
            },
        )
    }

    /// Play Alice to `target` with Bob missing everything
    fn advance_alice_to(game: &mut ClockGame, target: u8) {
        while game.target("a") != Some(target) {
            let next = game.target("a").unwrap();
            game.record_throw(Dart::single(next));
            if game.current_player().id == "b" {
                for _ in 0..3 {
                    game.record_throw(Dart::MISS);
                }
            }
        }
    }

    #[test]
    fn test_next_target() {
        assert_eq!(next_target(1, 1, false), Some(2));
        assert_eq!(next_target(19, 3, false), None);
        assert_eq!(next_target(19, 3, true), Some(25));
        assert_eq!(next_target(20, 1, false), None);
        assert_eq!(next_target(20, 1, true), Some(25));
        assert_eq!(next_target(25, 1, true), None);
    }

    #[test]
    fn test_double_advances_one_without_extra() {
        let mut game = new_game(false, false);
        advance_alice_to(&mut game, 5);
        game.record_throw(Dart::double(5));
        assert_eq!(game.target("a"), Some(6));
    }

    #[test]
    fn test_double_advances_two_with_extra() {
        let mut game = new_game(true, false);
        game.record_throw(Dart::double(1));
        assert_eq!(game.target("a"), Some(3));
        game.record_throw(Dart::triple(3));
        assert_eq!(game.target("a"), Some(6));
    }

    #[test]
    fn test_miss_keeps_target() {
        let mut game = new_game(false, false);
        game.record_throw(Dart::single(2));
        game.record_throw(Dart::MISS);
        assert_eq!(game.player_score("a"), 1);
    }

    #[test]
    fn test_finish_on_twenty() {
        let mut game = new_game(false, false);
        advance_alice_to(&mut game, 20);
        game.record_throw(Dart::single(20));
        assert!(game.is_finished());
        assert_eq!(game.winner().unwrap().id, "a");
        assert_eq!(game.target("a"), None);
    }

    #[test]
    fn test_bull_phase() {
        let mut game = new_game(false, true);
        advance_alice_to(&mut game, 20);
        game.record_throw(Dart::single(20));
        assert!(!game.is_leg_finished());
        assert_eq!(game.target("a"), Some(25));
        game.record_throw(Dart::bull());
        assert!(game.is_finished());
    }

    #[test]
    fn test_undo_finish() {
        let mut game = new_game(false, false);
        advance_alice_to(&mut game, 20);
        game.record_throw(Dart::single(20));
        assert!(game.undo_last_throw());
        assert!(!game.is_finished());
        assert_eq!(game.legs_won("a"), 0);
        assert_eq!(game.target("a"), Some(20));
        assert_eq!(game.current_player().id, "a");
    }

    #[test]
    fn test_undo_round_trip() {
        let mut game = new_game(true, false);
        let darts = [
            Dart::single(1), Dart::triple(2), Dart::MISS,
            Dart::double(1), Dart::single(3), Dart::single(4),
            Dart::single(5), Dart::MISS,
        ];
        for &dart in &darts {
            game.record_throw(dart);
        }
        assert_eq!(game.target("a"), Some(6));
        assert_eq!(game.target("b"), Some(5));
        for _ in 0..darts.len() {
            assert!(game.undo_last_throw());
        }
        assert!(!game.undo_last_throw());
        assert_eq!(game.target("a"), Some(1));
        assert_eq!(game.target("b"), Some(1));
        assert_eq!(game.current_player().id, "a");
    }
}
