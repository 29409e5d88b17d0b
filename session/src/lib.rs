#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Geo Quiz.
//!
//! A [`Session`] owns the objective cursor, the pick log, the feature
//! highlight board, the pending revert schedule, the hover tracker and the
//! score timer. Adapters mutate it exclusively through [`apply`], which
//! executes one [`Command`] and pushes the resulting [`Event`] values into a
//! caller-provided buffer. Both the 10 ms timer quantum and the 200 ms revert
//! delay are served by `Command::Tick` against the session clock, so no timer
//! callback exists outside the session itself.

use std::time::Duration;

use geo_quiz_core::{
    Command, ConstructionError, Event, FeatureCatalog, FeatureEffect, FeatureId, FeatureState,
    ObjectiveDeck, Outcome, PickEvent, PickRejection, PickSequence, SessionSummary, WELCOME_BANNER,
};
use geo_quiz_system_evaluator::classify;

mod board;
mod hover;
mod timer;

pub use board::REVERT_DELAY;
pub use timer::TIMER_TICK;

use board::{FeatureBoard, RevertSchedule};
use hover::HoverTracker;
use timer::SessionTimer;

/// Represents the authoritative state of one quiz run.
#[derive(Debug)]
pub struct Session {
    banner: &'static str,
    catalog: FeatureCatalog,
    deck: ObjectiveDeck,
    picks: Vec<PickEvent>,
    cursor: usize,
    correct_names: Vec<String>,
    missed_targets: Vec<String>,
    started: bool,
    completed: bool,
    abandoned: bool,
    board: FeatureBoard,
    reverts: RevertSchedule,
    hover: HoverTracker,
    clock: Duration,
    timer: SessionTimer,
}

impl Session {
    /// Creates a new session from a validated catalog and objective deck.
    ///
    /// Every deck name must resolve to a distinct catalog feature and the
    /// deck must hold at least one objective; otherwise construction fails
    /// with [`ConstructionError::DeckMismatch`] and no session exists. A deck
    /// dealt by the sequencer covers the whole catalog, but any unique
    /// subset is accepted.
    pub fn new(catalog: FeatureCatalog, deck: ObjectiveDeck) -> Result<Self, ConstructionError> {
        if deck.is_empty() {
            return Err(ConstructionError::DeckMismatch);
        }

        for (index, name) in deck.names().iter().enumerate() {
            if catalog.feature_by_name(name).is_none() {
                return Err(ConstructionError::DeckMismatch);
            }
            if deck.names()[..index].iter().any(|earlier| earlier == name) {
                return Err(ConstructionError::DeckMismatch);
            }
        }

        Ok(Self {
            banner: WELCOME_BANNER,
            catalog,
            deck,
            picks: Vec::new(),
            cursor: 0,
            correct_names: Vec::new(),
            missed_targets: Vec::new(),
            started: false,
            completed: false,
            abandoned: false,
            board: FeatureBoard::new(),
            reverts: RevertSchedule::new(),
            hover: HoverTracker::new(),
            clock: Duration::ZERO,
            timer: SessionTimer::new(),
        })
    }

    fn composed_state(&self, feature: FeatureId) -> FeatureState {
        let state = self.board.state_of(feature);
        if state == FeatureState::Neutral && self.hover.current() == Some(feature) {
            FeatureState::Hovered
        } else {
            state
        }
    }

    fn hover_enter(&mut self, feature: FeatureId, out_events: &mut Vec<Event>) {
        if !self.catalog.contains(feature) || self.hover.current() == Some(feature) {
            return;
        }

        if let Some(previous) = self.hover.replace(feature) {
            if self.board.state_of(previous) == FeatureState::Neutral {
                out_events.push(Event::FeatureStateChanged {
                    feature: previous,
                    state: FeatureState::Neutral,
                });
            }
        }

        if self.board.state_of(feature) == FeatureState::Neutral {
            out_events.push(Event::FeatureStateChanged {
                feature,
                state: FeatureState::Hovered,
            });
        }
    }

    fn hover_leave(&mut self, feature: FeatureId, out_events: &mut Vec<Event>) {
        if self.hover.leave(feature) && self.board.state_of(feature) == FeatureState::Neutral {
            out_events.push(Event::FeatureStateChanged {
                feature,
                state: FeatureState::Neutral,
            });
        }
    }

    fn submit_pick(&mut self, feature: FeatureId, name: String, out_events: &mut Vec<Event>) {
        if self.completed {
            out_events.push(Event::PickRejected {
                feature,
                reason: PickRejection::SessionCompleted,
            });
            return;
        }

        match self.catalog.feature_by_id(feature) {
            None => {
                out_events.push(Event::PickRejected {
                    feature,
                    reason: PickRejection::UnknownFeature,
                });
                return;
            }
            Some(entry) if entry.name() != name => {
                out_events.push(Event::PickRejected {
                    feature,
                    reason: PickRejection::NameMismatch,
                });
                return;
            }
            Some(_) => {}
        }

        // The cursor addresses an objective whenever the session is incomplete.
        let Some(expected) = self.deck.objective_at(self.cursor).map(str::to_string) else {
            return;
        };

        let sequence = PickSequence::new(self.cursor as u64);
        let pick = PickEvent::new(sequence, feature, name, self.clock);
        let evaluation = classify(
            &pick,
            &expected,
            &self.correct_names,
            &self.missed_targets,
            &self.catalog,
        );

        self.picks.push(pick);
        self.cursor += 1;

        out_events.push(Event::PickResolved {
            sequence,
            feature,
            outcome: evaluation.outcome,
        });
        for effect in evaluation.effects {
            self.apply_effect(effect, out_events);
        }

        match evaluation.outcome {
            Outcome::Correct => self.correct_names.push(expected),
            Outcome::Incorrect => self.missed_targets.push(expected),
        }

        if self.cursor == self.deck.len() {
            self.completed = true;
            self.timer.stop();
            out_events.push(Event::ObjectiveAdvanced { objective: None });
            out_events.push(Event::SessionCompleted {
                summary: self.summary(),
            });
        } else {
            out_events.push(Event::ObjectiveAdvanced {
                objective: self.deck.objective_at(self.cursor).map(str::to_string),
            });
        }
    }

    fn apply_effect(&mut self, effect: FeatureEffect, out_events: &mut Vec<Event>) {
        match effect {
            FeatureEffect::MarkCorrect { feature } => {
                self.reverts.cancel(feature);
                if self.board.set(feature, FeatureState::Correct) {
                    out_events.push(Event::FeatureStateChanged {
                        feature,
                        state: FeatureState::Correct,
                    });
                }
            }
            FeatureEffect::FlashIncorrect { feature } => {
                if self.board.state_of(feature).is_terminal() {
                    return;
                }
                if self.board.set(feature, FeatureState::Reverting) {
                    out_events.push(Event::FeatureStateChanged {
                        feature,
                        state: FeatureState::Reverting,
                    });
                }
                self.reverts
                    .schedule(feature, self.clock.saturating_add(REVERT_DELAY));
            }
            FeatureEffect::RevealMissedTarget { feature } => {
                self.reverts.cancel(feature);
                if self.board.set(feature, FeatureState::Incorrect) {
                    out_events.push(Event::FeatureStateChanged {
                        feature,
                        state: FeatureState::Incorrect,
                    });
                }
            }
        }
    }

    fn fire_due_reverts(&mut self, out_events: &mut Vec<Event>) {
        for feature in self.reverts.drain_due(self.clock) {
            // A revert only fires while the feature still carries the flash.
            if self.board.state_of(feature) == FeatureState::Reverting
                && self.board.set(feature, FeatureState::Neutral)
            {
                out_events.push(Event::FeatureStateChanged {
                    feature,
                    state: self.composed_state(feature),
                });
            }
        }
    }

    fn abandon(&mut self, out_events: &mut Vec<Event>) {
        if self.completed {
            return;
        }

        self.abandoned = true;
        self.timer.stop();
        self.reverts.clear();
        self.hover.clear();
        out_events.push(Event::SessionAbandoned);
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary::new(
            self.deck.len() as u32,
            self.correct_names.len() as u32,
            self.timer.elapsed(),
        )
    }
}

/// Applies the provided command to the session, mutating state deterministically.
///
/// An abandoned session ignores every further command.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    if session.abandoned {
        return;
    }

    match command {
        Command::StartSession => {
            if !session.started && !session.completed {
                session.started = true;
                session.timer.start();
                out_events.push(Event::SessionStarted);
                out_events.push(Event::ObjectiveAdvanced {
                    objective: session.deck.objective_at(session.cursor).map(str::to_string),
                });
            }
        }
        Command::Tick { dt } => {
            session.clock = session.clock.saturating_add(dt);
            session.timer.accumulate(dt);
            out_events.push(Event::TimeAdvanced { dt });
            session.fire_due_reverts(out_events);
        }
        Command::HoverEnter { feature } => session.hover_enter(feature, out_events),
        Command::HoverLeave { feature } => session.hover_leave(feature, out_events),
        Command::SubmitPick { feature, name } => session.submit_pick(feature, name, out_events),
        Command::AbandonSession => session.abandon(out_events),
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::time::Duration;

    use super::Session;
    use geo_quiz_core::{
        BoardView, FeatureCatalog, FeatureId, FeatureState, PickEvent, SessionSummary,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(session: &Session) -> &'static str {
        session.banner
    }

    /// Feature catalog the session resolves picks against.
    #[must_use]
    pub fn catalog(session: &Session) -> &FeatureCatalog {
        &session.catalog
    }

    /// Name of the objective the player must currently locate.
    #[must_use]
    pub fn current_objective(session: &Session) -> Option<&str> {
        session.deck.objective_at(session.cursor)
    }

    /// Number of picks accepted so far.
    #[must_use]
    pub fn cursor(session: &Session) -> usize {
        session.cursor
    }

    /// Number of objectives the deck contains.
    #[must_use]
    pub fn objective_total(session: &Session) -> usize {
        session.deck.len()
    }

    /// Names answered with a correct pick, in answer order.
    #[must_use]
    pub fn correct_names(session: &Session) -> &[String] {
        &session.correct_names
    }

    /// Number of objectives answered correctly.
    #[must_use]
    pub fn correct_count(session: &Session) -> usize {
        session.correct_names.len()
    }

    /// Objective names revealed as missed, in reveal order.
    #[must_use]
    pub fn missed_targets(session: &Session) -> &[String] {
        &session.missed_targets
    }

    /// Accepted picks in submission order.
    #[must_use]
    pub fn picks(session: &Session) -> &[PickEvent] {
        &session.picks
    }

    /// Reports whether the quiz was started.
    #[must_use]
    pub fn is_started(session: &Session) -> bool {
        session.started
    }

    /// Reports whether every objective was consumed.
    #[must_use]
    pub fn is_completed(session: &Session) -> bool {
        session.completed
    }

    /// Reports whether the session was torn down before completion.
    #[must_use]
    pub fn is_abandoned(session: &Session) -> bool {
        session.abandoned
    }

    /// Quantized time the score timer accumulated so far.
    #[must_use]
    pub fn elapsed(session: &Session) -> Duration {
        session.timer.elapsed()
    }

    /// Render state of the feature, with hover composed over the answer axis.
    #[must_use]
    pub fn feature_state(session: &Session, feature: FeatureId) -> FeatureState {
        session.composed_state(feature)
    }

    /// Feature currently under the pointer, if any.
    #[must_use]
    pub fn hovered_feature(session: &Session) -> Option<FeatureId> {
        session.hover.current()
    }

    /// Captures a sorted view of every feature holding a non-neutral highlight.
    #[must_use]
    pub fn board_view(session: &Session) -> BoardView {
        BoardView::from_snapshots(session.board.snapshots())
    }

    /// Final score, available once the session completed.
    #[must_use]
    pub fn summary(session: &Session) -> Option<SessionSummary> {
        session.completed.then(|| session.summary())
    }
}
