//! Authoritative feature highlight storage and revert scheduling.

use std::collections::BTreeMap;
use std::time::Duration;

use geo_quiz_core::{FeatureId, FeatureSnapshot, FeatureState};

/// Delay after which a wrong-pick flash reverts to neutral.
pub const REVERT_DELAY: Duration = Duration::from_millis(200);

/// Stores the answer-axis highlight of every non-neutral feature.
#[derive(Debug)]
pub(crate) struct FeatureBoard {
    states: BTreeMap<FeatureId, FeatureState>,
}

impl FeatureBoard {
    /// Creates an empty board where every feature reads as neutral.
    pub(crate) fn new() -> Self {
        Self {
            states: BTreeMap::new(),
        }
    }

    /// Highlight stored for the feature, `Neutral` for unseen ids.
    pub(crate) fn state_of(&self, feature: FeatureId) -> FeatureState {
        self.states
            .get(&feature)
            .copied()
            .unwrap_or(FeatureState::Neutral)
    }

    /// Stores the state, reporting whether it differs from the previous one.
    pub(crate) fn set(&mut self, feature: FeatureId, state: FeatureState) -> bool {
        if self.state_of(feature) == state {
            return false;
        }

        if state == FeatureState::Neutral {
            let _ = self.states.remove(&feature);
        } else {
            let _ = self.states.insert(feature, state);
        }
        true
    }

    /// Captures every non-neutral entry for query snapshots.
    pub(crate) fn snapshots(&self) -> Vec<FeatureSnapshot> {
        self.states
            .iter()
            .map(|(feature, state)| FeatureSnapshot {
                feature: *feature,
                state: *state,
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug)]
struct RevertEntry {
    deadline: Duration,
    feature: FeatureId,
}

/// Pending revert deadlines keyed to the session clock.
#[derive(Debug)]
pub(crate) struct RevertSchedule {
    entries: Vec<RevertEntry>,
}

impl RevertSchedule {
    /// Creates a schedule with no pending reverts.
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Schedules the feature's revert, replacing any earlier deadline.
    pub(crate) fn schedule(&mut self, feature: FeatureId, deadline: Duration) {
        self.cancel(feature);
        self.entries.push(RevertEntry { deadline, feature });
    }

    /// Drops the feature's pending revert, if one exists.
    pub(crate) fn cancel(&mut self, feature: FeatureId) {
        self.entries.retain(|entry| entry.feature != feature);
    }

    /// Drops every pending revert.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Removes the entries whose deadline passed, ordered by deadline then id.
    pub(crate) fn drain_due(&mut self, now: Duration) -> Vec<FeatureId> {
        let mut due: Vec<RevertEntry> = Vec::new();
        self.entries.retain(|entry| {
            if entry.deadline > now {
                return true;
            }
            due.push(*entry);
            false
        });
        due.sort_by_key(|entry| (entry.deadline, entry.feature));
        due.into_iter().map(|entry| entry.feature).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_features_read_as_neutral() {
        let board = FeatureBoard::new();
        assert_eq!(board.state_of(FeatureId::new(42)), FeatureState::Neutral);
    }

    #[test]
    fn storing_neutral_removes_the_entry() {
        let mut board = FeatureBoard::new();
        assert!(board.set(FeatureId::new(1), FeatureState::Reverting));
        assert!(board.set(FeatureId::new(1), FeatureState::Neutral));
        assert!(board.snapshots().is_empty());
    }

    #[test]
    fn storing_the_same_state_reports_no_change() {
        let mut board = FeatureBoard::new();
        assert!(board.set(FeatureId::new(1), FeatureState::Correct));
        assert!(!board.set(FeatureId::new(1), FeatureState::Correct));
        assert!(!board.set(FeatureId::new(2), FeatureState::Neutral));
    }

    #[test]
    fn rescheduling_replaces_the_earlier_deadline() {
        let mut schedule = RevertSchedule::new();
        schedule.schedule(FeatureId::new(1), Duration::from_millis(200));
        schedule.schedule(FeatureId::new(1), Duration::from_millis(400));

        assert!(schedule.drain_due(Duration::from_millis(200)).is_empty());
        assert_eq!(
            schedule.drain_due(Duration::from_millis(400)),
            vec![FeatureId::new(1)]
        );
    }

    #[test]
    fn due_entries_drain_in_deadline_then_id_order() {
        let mut schedule = RevertSchedule::new();
        schedule.schedule(FeatureId::new(9), Duration::from_millis(300));
        schedule.schedule(FeatureId::new(4), Duration::from_millis(100));
        schedule.schedule(FeatureId::new(7), Duration::from_millis(100));

        assert_eq!(
            schedule.drain_due(Duration::from_millis(300)),
            vec![FeatureId::new(4), FeatureId::new(7), FeatureId::new(9)]
        );
        assert!(schedule.drain_due(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn cancelled_entries_never_become_due() {
        let mut schedule = RevertSchedule::new();
        schedule.schedule(FeatureId::new(2), Duration::from_millis(200));
        schedule.cancel(FeatureId::new(2));

        assert!(schedule.drain_due(Duration::from_secs(1)).is_empty());
    }
}
