//! Leg and match progression shared by every game

/// Legs, leg winners and the match result
#[derive(Clone, Debug)]
pub struct MatchProgress {
    legs_to_win: u32,
    current_leg: u32,
    leg_starter: usize,
    legs_won: Vec<u32>,
    leg_winner: Option<usize>,
    finished: bool,
}

impl MatchProgress {
    pub fn new(player_count: usize, legs_to_win: u32) -> Self {
        Self {
            legs_to_win: legs_to_win.max(1),
            current_leg: 1,
            leg_starter: 0,
            legs_won: vec![0; player_count],
            leg_winner: None,
            finished: false,
        }
    }

    /// 1-based leg number
    pub fn current_leg(&self) -> u32 {
        self.current_leg
    }

    /// Player index that threw first in the current leg
    pub fn leg_starter(&self) -> usize {
        self.leg_starter
    }

    pub fn legs_won(&self, player: usize) -> u32 {
        self.legs_won.get(player).copied().unwrap_or(0)
    }

    pub fn is_leg_finished(&self) -> bool {
        self.leg_winner.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Winner of the current leg, if decided
    pub fn leg_winner(&self) -> Option<usize> {
        self.leg_winner
    }

    /// Match winner, if decided
    pub fn winner(&self) -> Option<usize> {
        if self.finished {
            self.leg_winner
        } else {
            None
        }
    }

    /// Throws are only accepted while the leg is live
    pub fn accepts_throws(&self) -> bool {
        !self.finished && self.leg_winner.is_none()
    }

    /// Credit the current leg to `player`. Returns true if that won the match.
    pub fn award_leg(&mut self, player: usize) -> bool {
        if let Some(won) = self.legs_won.get_mut(player) {
            *won += 1;
            self.leg_winner = Some(player);
            self.finished = *won >= self.legs_to_win;
            tracing::debug!(
                player,
                leg = self.current_leg,
                legs_won = *won,
                match_won = self.finished,
                "leg won"
            );
        }
        self.finished
    }

    /// Take back the leg credited by the last `award_leg`
    pub fn revoke_leg(&mut self) {
        if let Some(player) = self.leg_winner.take() {
            if let Some(won) = self.legs_won.get_mut(player) {
                *won = won.saturating_sub(1);
            }
            self.finished = false;
            tracing::debug!(player, leg = self.current_leg, "leg win undone");
        }
    }

    /// Move to the next leg and rotate the starting player.
    /// Returns the new starter, or None if the leg is not awaiting advance.
    pub fn advance_leg(&mut self) -> Option<usize> {
        if self.leg_winner.is_none() || self.finished {
            return None;
        }
        self.current_leg += 1;
        self.leg_starter = (self.leg_starter + 1) % self.legs_won.len().max(1);
        self.leg_winner = None;
        tracing::debug!(leg = self.current_leg, starter = self.leg_starter, "next leg");
        Some(self.leg_starter)
    }
}
