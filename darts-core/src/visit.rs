//! Visit bookkeeping shared by every game
//!
//! A visit is one player's turn of up to three darts. The tracker owns the
//! in-progress visit, the player rotation and the history of finished visits
//! so that undo can step back across turn boundaries.

use serde::{Deserialize, Serialize};

use crate::dart::Dart;

/// Darts per visit
pub const DARTS_PER_VISIT: usize = 3;

/// One player's turn
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub darts: Vec<Dart>,
    pub total: u32,
    pub busted: bool,
}

impl Visit {
    fn from_darts(darts: &[Dart]) -> Self {
        Self {
            darts: darts.to_vec(),
            total: darts.iter().map(Dart::value).sum(),
            busted: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.darts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.darts.len()
    }
}

/// A finished visit and who threw it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub player: usize,
    pub visit: Visit,
}

/// Turn rotation plus visit history
#[derive(Clone, Debug)]
pub struct VisitTracker {
    player_count: usize,
    current_player: usize,
    current: Visit,
    history: Vec<VisitRecord>,
}

impl VisitTracker {
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count: player_count.max(1),
            current_player: 0,
            current: Visit::default(),
            history: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Index of the player at the oche
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn current_visit(&self) -> &Visit {
        &self.current
    }

    /// Finished visits since the last full reset, oldest first
    pub fn history(&self) -> &[VisitRecord] {
        &self.history
    }

    pub fn is_visit_complete(&self) -> bool {
        self.current.darts.len() >= DARTS_PER_VISIT
    }

    pub fn darts_remaining(&self) -> usize {
        DARTS_PER_VISIT.saturating_sub(self.current.darts.len())
    }

    /// Darts thrown since the last full reset
    pub fn darts_thrown(&self) -> usize {
        self.history.iter().map(|r| r.visit.len()).sum::<usize>() + self.current.len()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Append a dart to the current visit. Returns false if it is already full.
    pub fn add_dart(&mut self, dart: Dart) -> bool {
        if self.is_visit_complete() {
            return false;
        }
        self.current.darts.push(dart);
        self.current.total += dart.value();
        true
    }

    /// Close the current visit into history and rotate to the next player
    /// unless `skip_advance` is set.
    pub fn end_visit(&mut self, busted: bool, skip_advance: bool) {
        let mut visit = std::mem::take(&mut self.current);
        visit.busted = busted;
        self.history.push(VisitRecord {
            player: self.current_player,
            visit,
        });
        if !skip_advance {
            self.current_player = (self.current_player + 1) % self.player_count;
        }
    }

    /// Remove the last dart of the in-progress visit
    pub fn undo_last_dart(&mut self) -> Option<Dart> {
        let dart = self.current.darts.pop()?;
        self.current.total -= dart.value();
        Some(dart)
    }

    /// Reopen the last finished visit with its final dart removed.
    ///
    /// Only valid while the current visit is empty. The returned record is the
    /// visit as it was finished (all darts, busted flag), while the tracker's
    /// current visit now holds every dart except the last.
    pub fn undo_previous_visit(&mut self) -> Option<VisitRecord> {
        if !self.current.is_empty() {
            return None;
        }
        let record = self.history.pop()?;
        let kept = record.visit.darts.len().saturating_sub(1);
        self.current_player = record.player;
        self.current = Visit::from_darts(&record.visit.darts[..kept]);
        Some(record)
    }

    /// Step back one dart, crossing into the previous visit if needed.
    /// Returns the owner of the removed dart along with the finished visit
    /// record when a boundary was crossed.
    pub fn undo_dart(&mut self) -> Option<UndoneDart> {
        if let Some(dart) = self.undo_last_dart() {
            return Some(UndoneDart {
                player: self.current_player,
                dart,
                reopened: None,
            });
        }
        let record = self.undo_previous_visit()?;
        let dart = *record.visit.darts.last()?;
        Some(UndoneDart {
            player: record.player,
            dart,
            reopened: Some(record),
        })
    }

    /// Clear the in-progress visit without recording it
    pub fn reset_visit(&mut self) {
        self.current = Visit::default();
    }

    /// Fresh leg: no history, empty visit, given player to throw first
    pub fn reset_all(&mut self, starting_player: usize) {
        self.history.clear();
        self.current = Visit::default();
        self.current_player = starting_player % self.player_count;
    }
}

/// Result of stepping back a single dart
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndoneDart {
    pub player: usize,
    pub dart: Dart,
    /// Set when the dart closed a finished visit that has now been reopened
    pub reopened: Option<VisitRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_until_full() {
        let mut tracker = VisitTracker::new(2);
        assert_eq!(tracker.darts_remaining(), 3);
        assert!(tracker.add_dart(Dart::triple(20)));
        assert!(tracker.add_dart(Dart::triple(20)));
        assert!(tracker.add_dart(Dart::triple(20)));
        assert!(tracker.is_visit_complete());
        assert!(!tracker.add_dart(Dart::single(1)));
        assert_eq!(tracker.current_visit().total, 180);
        assert_eq!(tracker.darts_remaining(), 0);
    }

    #[test]
    fn test_end_visit_rotates() {
        let mut tracker = VisitTracker::new(3);
        tracker.add_dart(Dart::single(5));
        tracker.end_visit(false, false);
        assert_eq!(tracker.current_player(), 1);
        assert!(tracker.current_visit().is_empty());
        assert_eq!(tracker.history().len(), 1);

        tracker.end_visit(false, false);
        tracker.end_visit(true, false);
        assert_eq!(tracker.current_player(), 0);
        assert!(tracker.history()[2].visit.busted);
    }

    #[test]
    fn test_skip_advance() {
        let mut tracker = VisitTracker::new(2);
        tracker.add_dart(Dart::double(20));
        tracker.end_visit(false, true);
        assert_eq!(tracker.current_player(), 0);
    }

    #[test]
    fn test_undo_within_visit() {
        let mut tracker = VisitTracker::new(2);
        tracker.add_dart(Dart::single(20));
        tracker.add_dart(Dart::single(5));
        assert_eq!(tracker.undo_last_dart(), Some(Dart::single(5)));
        assert_eq!(tracker.current_visit().total, 20);
        assert_eq!(tracker.undo_last_dart(), Some(Dart::single(20)));
        assert_eq!(tracker.undo_last_dart(), None);
    }

    #[test]
    fn test_undo_previous_visit_replays_partial() {
        let mut tracker = VisitTracker::new(2);
        tracker.add_dart(Dart::single(20));
        tracker.add_dart(Dart::single(1));
        tracker.add_dart(Dart::single(5));
        tracker.end_visit(false, false);
        assert_eq!(tracker.current_player(), 1);

        let record = tracker.undo_previous_visit().unwrap();
        assert_eq!(record.player, 0);
        assert_eq!(record.visit.darts.len(), 3);
        assert_eq!(tracker.current_player(), 0);
        assert_eq!(tracker.current_visit().darts, vec![Dart::single(20), Dart::single(1)]);
        assert_eq!(tracker.current_visit().total, 21);
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn test_undo_previous_visit_requires_empty_visit() {
        let mut tracker = VisitTracker::new(2);
        tracker.add_dart(Dart::single(20));
        tracker.end_visit(false, false);
        tracker.add_dart(Dart::single(3));
        assert!(tracker.undo_previous_visit().is_none());
    }

    #[test]
    fn test_undo_dart_counts_match_throws() {
        let mut tracker = VisitTracker::new(2);
        for n in 1..=7 {
            tracker.add_dart(Dart::single(n));
            if tracker.is_visit_complete() {
                tracker.end_visit(false, false);
            }
        }
        assert_eq!(tracker.darts_thrown(), 7);
        let mut undone = 0;
        while tracker.undo_dart().is_some() {
            undone += 1;
        }
        assert_eq!(undone, 7);
        assert_eq!(tracker.current_player(), 0);
        assert_eq!(tracker.darts_thrown(), 0);
    }

    #[test]
    fn test_reset_all() {
        let mut tracker = VisitTracker::new(2);
        tracker.add_dart(Dart::single(20));
        tracker.end_visit(false, false);
        tracker.reset_all(1);
        assert!(tracker.history().is_empty());
        assert_eq!(tracker.current_player(), 1);
        assert_eq!(tracker.darts_remaining(), 3);
    }
}
