#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Geo Quiz engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the session executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Geo Quiz.";

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Begins the quiz, arming the timer and surfacing the first objective.
    StartSession,
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of real time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Reports that the pointer entered the provided map feature.
    HoverEnter {
        /// Identifier of the feature the pointer now rests on.
        feature: FeatureId,
    },
    /// Reports that the pointer left the provided map feature.
    HoverLeave {
        /// Identifier of the feature the pointer departed.
        feature: FeatureId,
    },
    /// Submits a click on a map feature as an answer to the current objective.
    SubmitPick {
        /// Identifier of the clicked feature.
        feature: FeatureId,
        /// Display name carried by the clicked feature.
        name: String,
    },
    /// Tears the session down before completion, releasing its timer.
    AbandonSession,
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the quiz started and the timer is running.
    SessionStarted,
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of real time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a feature's highlight state changed.
    FeatureStateChanged {
        /// Identifier of the feature whose state changed.
        feature: FeatureId,
        /// State the feature transitioned into.
        state: FeatureState,
    },
    /// Confirms that a submitted pick was evaluated against its objective.
    PickResolved {
        /// Sequence number captured when the pick was submitted.
        sequence: PickSequence,
        /// Identifier of the clicked feature.
        feature: FeatureId,
        /// Verdict produced by the evaluator.
        outcome: Outcome,
    },
    /// Reports that a submitted pick was rejected without side effects.
    PickRejected {
        /// Identifier of the clicked feature.
        feature: FeatureId,
        /// Specific reason the pick was refused.
        reason: PickRejection,
    },
    /// Announces the objective the player should locate next.
    ObjectiveAdvanced {
        /// Name of the next objective, or `None` once the deck is exhausted.
        objective: Option<String>,
    },
    /// Announces that every objective was consumed and the timer froze.
    SessionCompleted {
        /// Final score captured at the moment of completion.
        summary: SessionSummary,
    },
    /// Confirms that the session was abandoned before completion.
    SessionAbandoned,
}

/// Unique identifier assigned to a map feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(u32);

impl FeatureId {
    /// Creates a new feature identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Monotonic sequence number assigned to a pick at submission time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickSequence(u64);

impl PickSequence {
    /// Creates a new pick sequence number with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the sequence number.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Position of the pick within the objective deck.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Catalog entry describing a single selectable map feature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeographicFeature {
    id: FeatureId,
    name: String,
}

impl GeographicFeature {
    /// Creates a new feature from an identifier and a display name.
    #[must_use]
    pub fn new(id: FeatureId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Identifier assigned to the feature by the map surface.
    #[must_use]
    pub const fn id(&self) -> FeatureId {
        self.id
    }

    /// Display name carried by the feature.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Validated, immutable set of features a quiz session draws from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureCatalog {
    features: Vec<GeographicFeature>,
}

impl FeatureCatalog {
    /// Builds a catalog from the provided features.
    ///
    /// Rejects an empty feature list as well as duplicate identifiers or
    /// duplicate display names. No partial catalog exists on failure.
    pub fn new(features: Vec<GeographicFeature>) -> Result<Self, ConstructionError> {
        if features.is_empty() {
            return Err(ConstructionError::EmptyFeatureSet);
        }

        for (index, feature) in features.iter().enumerate() {
            for earlier in &features[..index] {
                if earlier.id() == feature.id() {
                    return Err(ConstructionError::DuplicateFeatureId(feature.id()));
                }
                if earlier.name() == feature.name() {
                    return Err(ConstructionError::DuplicateFeatureName(
                        feature.name().to_string(),
                    ));
                }
            }
        }

        Ok(Self { features })
    }

    /// Number of features contained in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Reports whether the catalog holds no features.
    ///
    /// Always `false` for a successfully constructed catalog; provided so the
    /// type reads like a standard collection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Looks up the feature carrying the provided identifier.
    #[must_use]
    pub fn feature_by_id(&self, id: FeatureId) -> Option<&GeographicFeature> {
        self.features.iter().find(|feature| feature.id() == id)
    }

    /// Looks up the feature carrying the provided display name.
    #[must_use]
    pub fn feature_by_name(&self, name: &str) -> Option<&GeographicFeature> {
        self.features.iter().find(|feature| feature.name() == name)
    }

    /// Reports whether a feature with the provided identifier exists.
    #[must_use]
    pub fn contains(&self, id: FeatureId) -> bool {
        self.feature_by_id(id).is_some()
    }

    /// Iterator over the catalog's features in insertion order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &GeographicFeature> {
        self.features.iter()
    }
}

/// Fixed-order list of objective names the player must locate in turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectiveDeck {
    names: Vec<String>,
}

impl ObjectiveDeck {
    /// Creates a deck from the provided objective names.
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Number of objectives contained in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Reports whether the deck holds no objectives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Objective name at the provided position, if the deck extends that far.
    #[must_use]
    pub fn objective_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Objective names in deck order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Highlight state a map feature can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureState {
    /// No highlight; the feature renders with the base fill.
    Neutral,
    /// The pointer rests on the feature and no answer state overrides it.
    Hovered,
    /// The feature was picked correctly. Terminal.
    Correct,
    /// The feature is permanently marked as a missed objective. Terminal.
    Incorrect,
    /// The feature flashed red for a wrong pick and is waiting to revert.
    Reverting,
}

impl FeatureState {
    /// Reports whether the state is permanent for the rest of the session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Correct | Self::Incorrect)
    }
}

/// Verdict produced by evaluating a pick against its objective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The clicked feature matched the objective.
    Correct,
    /// The clicked feature did not match the objective.
    Incorrect,
}

/// Immutable record of a single submitted pick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickEvent {
    sequence: PickSequence,
    feature: FeatureId,
    name: String,
    timestamp: Duration,
}

impl PickEvent {
    /// Creates a new pick record.
    #[must_use]
    pub fn new(
        sequence: PickSequence,
        feature: FeatureId,
        name: impl Into<String>,
        timestamp: Duration,
    ) -> Self {
        Self {
            sequence,
            feature,
            name: name.into(),
            timestamp,
        }
    }

    /// Sequence number captured when the pick was submitted.
    #[must_use]
    pub const fn sequence(&self) -> PickSequence {
        self.sequence
    }

    /// Identifier of the clicked feature.
    #[must_use]
    pub const fn feature(&self) -> FeatureId {
        self.feature
    }

    /// Display name carried by the clicked feature.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Session clock reading at the moment of submission.
    #[must_use]
    pub const fn timestamp(&self) -> Duration {
        self.timestamp
    }
}

/// Board mutation directive produced by the pick evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureEffect {
    /// Permanently marks the feature as correctly picked.
    MarkCorrect {
        /// Identifier of the feature to mark.
        feature: FeatureId,
    },
    /// Flashes the feature red; the highlight self-reverts after a delay.
    FlashIncorrect {
        /// Identifier of the feature to flash.
        feature: FeatureId,
    },
    /// Permanently reveals the feature the player failed to locate.
    RevealMissedTarget {
        /// Identifier of the feature to reveal.
        feature: FeatureId,
    },
}

/// Final score captured when a session completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionSummary {
    total_objectives: u32,
    correct_count: u32,
    elapsed: Duration,
}

impl SessionSummary {
    /// Creates a new summary from the final session counters.
    #[must_use]
    pub const fn new(total_objectives: u32, correct_count: u32, elapsed: Duration) -> Self {
        Self {
            total_objectives,
            correct_count,
            elapsed,
        }
    }

    /// Number of objectives the deck contained.
    #[must_use]
    pub const fn total_objectives(&self) -> u32 {
        self.total_objectives
    }

    /// Number of objectives answered with a correct pick.
    #[must_use]
    pub const fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Time the session ran before the clock froze.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Frozen session time expressed in whole milliseconds.
    #[must_use]
    pub const fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Reasons a submitted pick may be rejected by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickRejection {
    /// Every objective was already consumed, so picks are disabled.
    SessionCompleted,
    /// The clicked identifier does not exist in the catalog.
    UnknownFeature,
    /// The submitted name contradicts the catalog entry for the identifier.
    NameMismatch,
}

/// Immutable representation of a single feature's highlight used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureSnapshot {
    /// Identifier of the captured feature.
    pub feature: FeatureId,
    /// Highlight state the feature occupied at capture time.
    pub state: FeatureState,
}

/// Read-only snapshot describing every highlighted feature on the board.
#[derive(Clone, Debug, Default)]
pub struct BoardView {
    snapshots: Vec<FeatureSnapshot>,
}

impl BoardView {
    /// Creates a new board view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<FeatureSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.feature);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &FeatureSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<FeatureSnapshot> {
        self.snapshots
    }
}

/// Reasons catalog or session construction may fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    /// The provided feature list was empty.
    EmptyFeatureSet,
    /// Two features carried the same identifier.
    DuplicateFeatureId(FeatureId),
    /// Two features carried the same display name.
    DuplicateFeatureName(String),
    /// The objective deck is not a permutation of the catalog's names.
    DeckMismatch,
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFeatureSet => write!(formatter, "feature set must not be empty"),
            Self::DuplicateFeatureId(id) => {
                write!(formatter, "feature id {} appears more than once", id.get())
            }
            Self::DuplicateFeatureName(name) => {
                write!(formatter, "feature name \"{name}\" appears more than once")
            }
            Self::DeckMismatch => write!(
                formatter,
                "objective deck is not a permutation of the catalog names"
            ),
        }
    }
}

impl std::error::Error for ConstructionError {}
