#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that classifies a submitted pick against the current objective.

use geo_quiz_core::{FeatureCatalog, FeatureEffect, Outcome, PickEvent};

/// Verdict and board directives produced for a single pick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// Verdict reached for the pick.
    pub outcome: Outcome,
    /// Board mutations the session must apply, in order.
    pub effects: Vec<FeatureEffect>,
}

/// Classifies a pick against the objective it was captured for.
///
/// The function is pure: the verdict and effects depend only on the pick, the
/// expected objective name, the names already answered correctly, the targets
/// already revealed, and the catalog used to resolve the reveal target.
#[must_use]
pub fn classify(
    pick: &PickEvent,
    expected_name: &str,
    correct_names: &[String],
    missed_targets: &[String],
    catalog: &FeatureCatalog,
) -> Evaluation {
    if pick.name() == expected_name {
        return Evaluation {
            outcome: Outcome::Correct,
            effects: vec![FeatureEffect::MarkCorrect {
                feature: pick.feature(),
            }],
        };
    }

    let mut effects = Vec::new();

    // Solved features and revealed targets keep their permanent highlight;
    // only an unmarked feature flashes for a wrong pick.
    if !contains_name(correct_names, pick.name()) && !contains_name(missed_targets, pick.name()) {
        effects.push(FeatureEffect::FlashIncorrect {
            feature: pick.feature(),
        });
    }

    if !contains_name(correct_names, expected_name) {
        if let Some(target) = catalog.feature_by_name(expected_name) {
            effects.push(FeatureEffect::RevealMissedTarget {
                feature: target.id(),
            });
        }
    }

    Evaluation {
        outcome: Outcome::Incorrect,
        effects,
    }
}

fn contains_name(names: &[String], name: &str) -> bool {
    names.iter().any(|candidate| candidate == name)
}
