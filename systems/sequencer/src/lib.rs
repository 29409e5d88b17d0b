#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic system that deals shuffled objective decks for quiz sessions.

use geo_quiz_core::{FeatureCatalog, ObjectiveDeck};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the sequencer.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided random seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Deals objective decks as seeded permutations of a feature catalog.
#[derive(Debug)]
pub struct ObjectiveSequencer {
    rng: ChaCha8Rng,
}

impl ObjectiveSequencer {
    /// Creates a new sequencer using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Deals a deck containing every catalog name exactly once.
    ///
    /// The ordering is drawn with an in-place Fisher-Yates shuffle, so every
    /// permutation of the catalog is equally likely. The same seed and catalog
    /// always deal the same deck.
    #[must_use]
    pub fn initialize(&mut self, catalog: &FeatureCatalog) -> ObjectiveDeck {
        let mut names: Vec<String> = catalog
            .iter()
            .map(|feature| feature.name().to_string())
            .collect();
        names.shuffle(&mut self.rng);
        ObjectiveDeck::new(names)
    }
}
