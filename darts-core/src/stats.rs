//! X01 match statistics derived from completed-leg visit history

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::game::{Game, GameKind, Player};
use crate::games::{CompletedLeg, X01Game};

/// Per-player figures over a set of legs
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub player_id: String,
    pub name: String,
    pub darts_thrown: u32,
    pub points_scored: u32,
    pub three_dart_average: f64,
    pub legs_won: u32,
    /// Fewest darts in a won leg
    pub best_leg: Option<u32>,
    pub highest_visit: u32,
    pub highest_checkout: Option<u32>,
    /// Visits scoring 100-139
    pub visits_100_plus: u32,
    /// Visits scoring 140-179
    pub visits_140_plus: u32,
    pub visits_180: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub variant: u32,
    pub legs_played: u32,
    pub players: Vec<PlayerStatistics>,
}

impl MatchStatistics {
    pub fn from_legs(players: &[Player], legs: &[CompletedLeg], variant: u32) -> Self {
        let mut stats: Vec<PlayerStatistics> = players
            .iter()
            .map(|p| PlayerStatistics {
                player_id: p.id.clone(),
                name: p.name.clone(),
                ..Default::default()
            })
            .collect();

        for leg in legs {
            tally_leg(&mut stats, leg);
        }

        for player in &mut stats {
            player.three_dart_average = if player.darts_thrown == 0 {
                0.0
            } else {
                player.points_scored as f64 / player.darts_thrown as f64 * 3.0
            };
        }

        Self {
            variant,
            legs_played: legs.len() as u32,
            players: stats,
        }
    }

    pub fn player(&self, player_id: &str) -> Option<&PlayerStatistics> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}

fn tally_leg(stats: &mut [PlayerStatistics], leg: &CompletedLeg) {
    let mut leg_darts = vec![0u32; stats.len()];

    for record in &leg.visits {
        let Some(player) = stats.get_mut(record.player) else {
            continue;
        };
        let darts = record.visit.len() as u32;
        player.darts_thrown += darts;
        leg_darts[record.player] += darts;

        if record.visit.busted {
            continue;
        }
        let scored = record.visit.total;
        player.points_scored += scored;
        player.highest_visit = player.highest_visit.max(scored);
        match scored {
            180 => player.visits_180 += 1,
            140..=179 => player.visits_140_plus += 1,
            100..=139 => player.visits_100_plus += 1,
            _ => {}
        }
    }

    let Some(winner) = leg.winner else {
        return;
    };
    let checkout = leg
        .visits
        .iter()
        .rev()
        .find(|r| r.player == winner && !r.visit.busted)
        .map(|r| r.visit.total);
    if let Some(player) = stats.get_mut(winner) {
        player.legs_won += 1;
        let darts = leg_darts[winner];
        player.best_leg = Some(player.best_leg.map_or(darts, |best| best.min(darts)));
        if let Some(checkout) = checkout {
            player.highest_checkout = Some(player.highest_checkout.map_or(checkout, |h| h.max(checkout)));
        }
    }
}

/// Everything a statistics store needs about a finished match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub game_type: GameKind,
    pub players: Vec<Player>,
    pub completed_legs: Vec<CompletedLeg>,
    pub variant: u32,
    pub winner_name: Option<String>,
}

impl MatchRecord {
    pub fn new(
        game_type: GameKind,
        players: Vec<Player>,
        completed_legs: Vec<CompletedLeg>,
        variant: u32,
        winner_name: Option<String>,
    ) -> Self {
        Self {
            game_type,
            players,
            completed_legs,
            variant,
            winner_name,
        }
    }

    /// Snapshot of an X01 match, including its deciding leg
    pub fn from_x01(game: &X01Game) -> Self {
        Self::new(
            GameKind::X01,
            game.players().to_vec(),
            game.match_legs(),
            game.config().variant,
            game.winner().map(|p| p.name.clone()),
        )
    }

    pub fn player_names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn names_by_id(&self) -> FxHashMap<&str, &str> {
        self.players
            .iter()
            .map(|p| (p.id.as_str(), p.name.as_str()))
            .collect()
    }

    pub fn statistics(&self) -> MatchStatistics {
        MatchStatistics::from_legs(&self.players, &self.completed_legs, self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutRule, X01Config};
    use crate::dart::Dart;

    fn players() -> Vec<Player> {
        vec![Player::new("a", "Alice"), Player::new("b", "Bob")]
    }

    fn throw_all(game: &mut X01Game, darts: &[Dart]) {
        for &dart in darts {
            game.record_throw(dart);
        }
    }

    /// Alice: 180, 180, 141 (T20 T19 D12) = 501 in 9 darts
    fn nine_darter(game: &mut X01Game) {
        let t20 = Dart::triple(20);
        let miss = Dart::MISS;
        throw_all(game, &[t20, t20, t20]);
        throw_all(game, &[miss, miss, miss]);
        throw_all(game, &[t20, t20, t20]);
        throw_all(game, &[Dart::single(20), Dart::triple(20), Dart::triple(20)]);
        throw_all(game, &[t20, Dart::triple(19), Dart::double(12)]);
    }

    #[test]
    fn test_nine_dart_leg() {
        let mut game = X01Game::new(players(), X01Config::default());
        nine_darter(&mut game);
        assert!(game.is_finished());

        let record = MatchRecord::from_x01(&game);
        assert_eq!(record.winner_name.as_deref(), Some("Alice"));
        assert_eq!(record.player_names(), vec!["Alice", "Bob"]);
        assert_eq!(record.names_by_id().get("b"), Some(&"Bob"));

        let stats = record.statistics();
        assert_eq!(stats.legs_played, 1);
        let alice = stats.player("a").unwrap();
        assert_eq!(alice.darts_thrown, 9);
        assert_eq!(alice.points_scored, 501);
        assert!((alice.three_dart_average - 167.0).abs() < 1e-9);
        assert_eq!(alice.visits_180, 2);
        assert_eq!(alice.visits_140_plus, 1);
        assert_eq!(alice.best_leg, Some(9));
        assert_eq!(alice.highest_checkout, Some(141));
        assert_eq!(alice.legs_won, 1);

        let bob = stats.player("b").unwrap();
        assert_eq!(bob.darts_thrown, 6);
        assert_eq!(bob.points_scored, 140);
        assert_eq!(bob.visits_140_plus, 1);
        assert_eq!(bob.legs_won, 0);
        assert_eq!(bob.best_leg, None);
    }

    #[test]
    fn test_busted_visits_score_nothing() {
        let mut game = X01Game::new(
            players(),
            X01Config {
                variant: 40,
                out_rule: OutRule::Double,
                legs: 1,
            },
        );
        // T20 overshoots and ends the visit after one dart
        throw_all(&mut game, &[Dart::triple(20)]);
        throw_all(&mut game, &[Dart::MISS, Dart::MISS, Dart::MISS]);
        throw_all(&mut game, &[Dart::double(20)]);

        let stats = MatchRecord::from_x01(&game).statistics();
        let alice = stats.player("a").unwrap();
        assert_eq!(alice.darts_thrown, 2);
        assert_eq!(alice.points_scored, 40);
        assert_eq!(alice.highest_visit, 40);
        assert_eq!(alice.highest_checkout, Some(40));
        assert_eq!(alice.best_leg, Some(2));
    }

    #[test]
    fn test_best_leg_across_legs() {
        let mut game = X01Game::new(
            players(),
            X01Config {
                variant: 40,
                out_rule: OutRule::Double,
                legs: 2,
            },
        );
        // Leg 1: Alice needs two visits
        throw_all(&mut game, &[Dart::MISS, Dart::MISS, Dart::MISS]);
        throw_all(&mut game, &[Dart::MISS, Dart::MISS, Dart::MISS]);
        throw_all(&mut game, &[Dart::single(20), Dart::double(10)]);
        game.next_leg();
        // Leg 2: Bob starts and misses, Alice takes one dart
        throw_all(&mut game, &[Dart::MISS, Dart::MISS, Dart::MISS]);
        throw_all(&mut game, &[Dart::double(20)]);
        assert!(game.is_finished());

        let stats = MatchRecord::from_x01(&game).statistics();
        assert_eq!(stats.legs_played, 2);
        let alice = stats.player("a").unwrap();
        assert_eq!(alice.legs_won, 2);
        assert_eq!(alice.best_leg, Some(1));
        assert_eq!(alice.highest_checkout, Some(40));
    }

    #[test]
    fn test_empty_history() {
        let stats = MatchStatistics::from_legs(&players(), &[], 501);
        assert_eq!(stats.legs_played, 0);
        assert_eq!(stats.player("a").unwrap().three_dart_average, 0.0);
    }
}
