//! Cricket: close 15-20 and the bull, scoring on numbers opponents still have open

use crate::config::CricketConfig;
use crate::dart::{Dart, BULL, OUTER_BULL};
use crate::game::{player_index, Game, GameKind, Player};
use crate::progress::MatchProgress;
use crate::visit::{Visit, VisitTracker};

/// Numbers in play, bull last
pub const CRICKET_NUMBERS: [u8; 7] = [15, 16, 17, 18, 19, 20, 25];

/// Marks per number, indexed like `CRICKET_NUMBERS`
pub type Marks = [u32; 7];

/// Index into `CRICKET_NUMBERS`
fn number_index(number: u8) -> Option<usize> {
    CRICKET_NUMBERS.iter().position(|&n| n == number)
}

/// Number index and mark count for a dart, or None if it misses every number
fn cricket_hit(dart: Dart) -> Option<(usize, u32)> {
    match dart.segment {
        BULL => Some((6, 2)),
        OUTER_BULL => Some((6, 1)),
        15..=20 if matches!(dart.multiplier, 1..=3) => {
            number_index(dart.segment).map(|i| (i, dart.multiplier as u32))
        }
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct CricketPlayer {
    marks: Marks,
    points: u32,
}

/// Player state before a throw
#[derive(Clone, Copy, Debug)]
struct ThrowSnapshot {
    player: usize,
    before: CricketPlayer,
}

#[derive(Clone, Debug)]
pub struct CricketGame {
    players: Vec<Player>,
    config: CricketConfig,
    state: Vec<CricketPlayer>,
    tracker: VisitTracker,
    progress: MatchProgress,
    snapshots: Vec<ThrowSnapshot>,
}

impl CricketGame {
    /// `players` must not be empty. `GameRegistry::create` checks player
    /// counts and the config before building.
    pub fn new(players: Vec<Player>, config: CricketConfig) -> Self {
        let count = players.len();
        Self {
            state: vec![CricketPlayer::default(); count],
            tracker: VisitTracker::new(count),
            progress: MatchProgress::new(count, config.legs),
            snapshots: Vec::new(),
            players,
            config,
        }
    }

    pub fn config(&self) -> &CricketConfig {
        &self.config
    }

    /// Raw mark totals; values at or above `marks_to_close` mean closed
    pub fn marks(&self, player_id: &str) -> Marks {
        player_index(&self.players, player_id)
            .map(|i| self.state[i].marks)
            .unwrap_or_default()
    }

    pub fn is_closed(&self, player_id: &str, number: u8) -> bool {
        match (player_index(&self.players, player_id), number_index(number)) {
            (Some(p), Some(n)) => self.closed(p, n),
            _ => false,
        }
    }

    fn closed(&self, player: usize, number: usize) -> bool {
        self.state[player].marks[number] >= self.config.marks_to_close
    }

    fn all_opponents_closed(&self, player: usize, number: usize) -> bool {
        (0..self.state.len())
            .filter(|&p| p != player)
            .all(|p| self.closed(p, number))
    }

    fn has_won(&self, player: usize) -> bool {
        let all_closed = (0..CRICKET_NUMBERS.len()).all(|n| self.closed(player, n));
        let points = self.state[player].points;
        all_closed && self.state.iter().all(|other| points >= other.points)
    }

    fn apply_marks(&mut self, player: usize, number: usize, hits: u32) {
        let close = self.config.marks_to_close;
        let current = self.state[player].marks[number];
        // Marks beyond the closing threshold score, within the same throw too
        let scoring = if current < close {
            (current + hits).saturating_sub(close)
        } else {
            hits
        };
        if scoring > 0 && !self.all_opponents_closed(player, number) {
            self.state[player].points += CRICKET_NUMBERS[number] as u32 * scoring;
        }
        self.state[player].marks[number] += hits;
    }
}

impl Game for CricketGame {
    fn kind(&self) -> GameKind {
        GameKind::Cricket
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
            before: self.state[player],
        });
        self.tracker.add_dart(dart);

        if let Some((number, hits)) = cricket_hit(dart) {
            self.apply_marks(player, number, hits);
        }

        if self.has_won(player) {
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

    fn player_score(&self, player_id: &str) -> u32 {
        player_index(&self.players, player_id)
            .map(|i| self.state[i].points)
            .unwrap_or(0)
    }

    fn next_leg(&mut self) {
        if let Some(starter) = self.progress.advance_leg() {
            self.state.fill(CricketPlayer::default());
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

    fn new_game(marks_to_close: u32) -> CricketGame {
        let players = vec![Player::new("a", "Alice"), Player::new("b", "Bob")];
        CricketGame::new(players, CricketConfig { marks_to_close, legs: 1 })
    }

    fn pass(game: &mut CricketGame) {
        for _ in 0..3 {
            game.record_throw(Dart::MISS);
        }
    }

    /// Close every number for whoever is up, one visit per number
    fn close_everything(game: &mut CricketGame, other_passes: bool) {
        for number in 15..=20 {
            game.record_throw(Dart::triple(number));
            game.record_throw(Dart::MISS);
            game.record_throw(Dart::MISS);
            if other_passes {
                pass(game);
            }
        }
        game.record_throw(Dart::bull());
        game.record_throw(Dart::outer_bull());
    }

    #[test]
    fn test_off_board_multiplier_marks_nothing() {
        let mut game = new_game(3);
        game.record_throw(Dart::new(20, 4));
        game.record_throw(Dart::new(20, 7));
        assert_eq!(game.marks("a"), [0; 7]);
        assert_eq!(game.player_score("a"), 0);
        assert_eq!(game.current_visit().len(), 2);
    }

    #[test]
    fn test_triple_closes_without_points() {
        let mut game = new_game(3);
        game.record_throw(Dart::triple(20));
        assert!(game.is_closed("a", 20));
        assert_eq!(game.player_score("a"), 0);
    }

    #[test]
    fn test_closed_number_scores_next_visit() {
        let mut game = new_game(3);
        game.record_throw(Dart::triple(20));
        game.record_throw(Dart::MISS);
        game.record_throw(Dart::MISS);
        pass(&mut game);
        game.record_throw(Dart::single(20));
        assert_eq!(game.player_score("a"), 20);
    }

    #[test]
    fn test_straddling_throw_splits_marks() {
        let mut game = new_game(3);
        game.record_throw(Dart::double(19));
        game.record_throw(Dart::triple(19));
        // 2 marks existing + 3: one closes, two score
        assert_eq!(game.player_score("a"), 38);
        assert_eq!(game.marks("a")[4], 5);
    }

    #[test]
    fn test_no_points_when_opponents_closed() {
        let mut game = new_game(3);
        pass(&mut game);
        game.record_throw(Dart::triple(18));
        game.record_throw(Dart::MISS);
        game.record_throw(Dart::MISS);
        game.record_throw(Dart::triple(18));
        game.record_throw(Dart::triple(18));
        assert_eq!(game.player_score("a"), 0);
        assert_eq!(game.marks("a")[3], 6);
    }

    #[test]
    fn test_bull_marks() {
        let mut game = new_game(3);
        game.record_throw(Dart::bull());
        game.record_throw(Dart::outer_bull());
        assert!(game.is_closed("a", 25));
        game.record_throw(Dart::bull());
        assert_eq!(game.player_score("a"), 50);
    }

    #[test]
    fn test_non_cricket_dart_consumes_visit() {
        let mut game = new_game(3);
        game.record_throw(Dart::triple(5));
        game.record_throw(Dart::single(14));
        game.record_throw(Dart::new(60, 3));
        assert_eq!(game.current_player().id, "b");
        assert_eq!(game.marks("a"), [0; 7]);
    }

    #[test]
    fn test_win_requires_all_closed_and_points_lead() {
        let mut game = new_game(3);
        close_everything(&mut game, true);
        assert!(game.is_finished());
        assert_eq!(game.winner().unwrap().id, "a");
        assert_eq!(game.current_player().id, "a");
    }

    #[test]
    fn test_closed_but_behind_does_not_win() {
        let mut game = new_game(1);
        // Alice closes 20 and scores with her next two darts, Bob cannot score there
        game.record_throw(Dart::triple(20));
        game.record_throw(Dart::triple(20));
        game.record_throw(Dart::MISS);
        // Bob closes everything but trails on points
        for dart in [Dart::single(15), Dart::single(16), Dart::single(17)] {
            game.record_throw(dart);
        }
        pass(&mut game);
        for dart in [Dart::single(18), Dart::single(19), Dart::single(20)] {
            game.record_throw(dart);
        }
        pass(&mut game);
        game.record_throw(Dart::bull());
        game.record_throw(Dart::outer_bull());
        assert!(CRICKET_NUMBERS.iter().all(|&n| game.is_closed("b", n)));
        assert_eq!(game.player_score("a"), 100);
        assert_eq!(game.player_score("b"), 50);
        assert!(!game.is_leg_finished());
    }

    #[test]
    fn test_marks_never_decrease() {
        let mut game = new_game(3);
        let darts = [
            Dart::single(20), Dart::double(20), Dart::triple(20),
            Dart::single(15), Dart::triple(16), Dart::bull(),
        ];
        let mut last = game.marks("a");
        for (i, &dart) in darts.iter().enumerate() {
            game.record_throw(dart);
            if i % 3 == 2 {
                pass(&mut game);
            }
            let now = game.marks("a");
            assert!(now.iter().zip(last.iter()).all(|(n, l)| n >= l));
            last = now;
        }
    }

    #[test]
    fn test_undo_restores_snapshot() {
        let mut game = new_game(3);
        game.record_throw(Dart::double(19));
        game.record_throw(Dart::triple(19));
        assert!(game.undo_last_throw());
        assert_eq!(game.player_score("a"), 0);
        assert_eq!(game.marks("a")[4], 2);
        assert!(game.undo_last_throw());
        assert!(!game.undo_last_throw());
        assert_eq!(game.marks("a"), [0; 7]);
    }

    #[test]
    fn test_undo_win() {
        let mut game = new_game(3);
        close_everything(&mut game, true);
        assert!(game.is_finished());
        assert!(game.undo_last_throw());
        assert!(!game.is_finished());
        assert!(!game.is_leg_finished());
        assert_eq!(game.legs_won("a"), 0);
        assert_eq!(game.current_player().id, "a");
        assert_eq!(game.current_visit().darts, vec![Dart::bull()]);
        game.record_throw(Dart::outer_bull());
        assert!(game.is_finished());
    }

    #[test]
    fn test_undo_round_trip_across_visits() {
        let mut game = new_game(3);
        let darts = [
            Dart::triple(20), Dart::single(20), Dart::double(19),
            Dart::triple(20), Dart::single(18), Dart::MISS,
            Dart::triple(19), Dart::single(20),
        ];
        for &dart in &darts {
            game.record_throw(dart);
        }
        for _ in 0..darts.len() {
            assert!(game.undo_last_throw());
        }
        assert_eq!(game.marks("a"), [0; 7]);
        assert_eq!(game.marks("b"), [0; 7]);
        assert_eq!(game.player_score("a"), 0);
        assert_eq!(game.current_player().id, "a");
        assert!(game.current_visit().is_empty());
    }

    #[test]
    fn test_next_leg_resets_marks() {
        let players = vec![Player::new("a", "Alice"), Player::new("b", "Bob")];
        let mut game = CricketGame::new(players, CricketConfig { marks_to_close: 3, legs: 2 });
        close_everything(&mut game, true);
        assert!(game.is_leg_finished());
        assert!(!game.is_finished());
        game.next_leg();
        assert_eq!(game.current_leg(), 2);
        assert_eq!(game.marks("a"), [0; 7]);
        assert_eq!(game.current_player().id, "b");
        assert!(!game.undo_last_throw());
    }
}
