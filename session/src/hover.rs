//! Pointer hover bookkeeping, independent of the answer axis.

use geo_quiz_core::FeatureId;

/// Tracks the single feature currently under the pointer.
#[derive(Debug)]
pub(crate) struct HoverTracker {
    current: Option<FeatureId>,
}

impl HoverTracker {
    /// Creates a tracker with no hovered feature.
    pub(crate) fn new() -> Self {
        Self { current: None }
    }

    /// Feature currently under the pointer, if any.
    pub(crate) fn current(&self) -> Option<FeatureId> {
        self.current
    }

    /// Makes the feature the hovered one, returning the feature that lost it.
    pub(crate) fn replace(&mut self, feature: FeatureId) -> Option<FeatureId> {
        self.current.replace(feature)
    }

    /// Clears the hover if the provided feature holds it.
    pub(crate) fn leave(&mut self, feature: FeatureId) -> bool {
        if self.current == Some(feature) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Unconditionally clears the hover.
    pub(crate) fn clear(&mut self) {
        self.current = None;
    }
}
